//! Contract validator for API request inputs
//!
//! Validation semantics:
//! - Input must be a JSON object
//! - All required fields are present
//! - Field types exactly match declared types (null is a type, not absence)
//! - Strings meet their minimum length
//! - Dates parse as a calendar date
//! - Choices accept the first alternative that matches structurally
//!
//! Every failing field is reported; there is no partial success. Undeclared
//! fields are stripped from the normalized value, or reported when the
//! validator runs with [`ExtraFields::Reject`].

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use super::errors::{AlternativeFailure, ContractError, ContractResult, Violation};
use super::registry::ContractRegistry;
use super::requests::ContractRequest;
use super::types::{Alternative, Contract, FieldDef, FieldSet, FieldType, Shape};

/// Policy for fields an input carries but the contract does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFields {
    /// Drop them from the normalized value
    #[default]
    Ignore,
    /// Report each one as a violation
    Reject,
}

/// Validator that checks inputs against registered contracts.
///
/// Validation is pure and deterministic; the input is never mutated.
pub struct ContractValidator<'a> {
    registry: &'a ContractRegistry,
    extra_fields: ExtraFields,
}

impl<'a> ContractValidator<'a> {
    /// Creates a new validator backed by the given registry.
    pub fn new(registry: &'a ContractRegistry) -> Self {
        Self {
            registry,
            extra_fields: ExtraFields::Ignore,
        }
    }

    /// Sets the policy for undeclared fields.
    pub fn with_extra_fields(mut self, extra_fields: ExtraFields) -> Self {
        self.extra_fields = extra_fields;
        self
    }

    /// Validates `input` against the contract registered as `contract_name`.
    ///
    /// Returns the normalized value: declared fields only, dates as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// - `LINGO_UNKNOWN_CONTRACT` if no such contract is registered
    /// - `LINGO_CONTRACT_VALIDATION_FAILED` with every failing field otherwise
    pub fn validate(&self, contract_name: &str, input: &Value) -> ContractResult<Value> {
        let contract = self
            .registry
            .get(contract_name)
            .ok_or_else(|| ContractError::UnknownContract(contract_name.to_string()))?;

        self.validate_contract(contract, input)
    }

    /// Validates `input` against a contract that is not necessarily registered.
    pub fn validate_contract(&self, contract: &Contract, input: &Value) -> ContractResult<Value> {
        let obj = input.as_object().ok_or_else(|| {
            ContractError::validation_failed(
                &contract.name,
                vec![Violation::wrong_type("$root", "object", json_type_name(input))],
            )
        })?;

        match &contract.shape {
            Shape::Object { fields } => {
                let mut violations = Vec::new();
                let normalized = check_fields(obj, fields, &mut violations);
                if self.extra_fields == ExtraFields::Reject {
                    for key in obj.keys().filter(|k| !fields.contains_key(*k)) {
                        violations.push(Violation::unknown_field(key));
                    }
                }

                if violations.is_empty() {
                    Ok(Value::Object(normalized))
                } else {
                    Err(ContractError::validation_failed(&contract.name, violations))
                }
            }
            Shape::OneOf { alternatives } => self
                .match_alternative(obj, alternatives)
                .map_err(|failures| {
                    ContractError::validation_failed(
                        &contract.name,
                        vec![Violation::no_alternative(failures)],
                    )
                }),
        }
    }

    /// Validates and converts into the request type bound to the contract.
    pub fn parse<T: ContractRequest>(&self, input: &Value) -> ContractResult<T> {
        self.validate_as(T::CONTRACT, input)
    }

    /// Validates against `contract_name` and deserializes the normalized value into `T`.
    pub fn validate_as<T: DeserializeOwned>(
        &self,
        contract_name: &str,
        input: &Value,
    ) -> ContractResult<T> {
        let normalized = self.validate(contract_name, input)?;
        serde_json::from_value(normalized).map_err(|e| ContractError::TypeMismatch {
            contract: contract_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Tries each alternative in declaration order and returns the first match.
    ///
    /// A field declared only by another alternative counts against this one,
    /// so an input carrying fields of two alternatives matches neither.
    fn match_alternative(
        &self,
        obj: &Map<String, Value>,
        alternatives: &[Alternative],
    ) -> Result<Value, Vec<AlternativeFailure>> {
        let mut failures = Vec::with_capacity(alternatives.len());

        for (i, alt) in alternatives.iter().enumerate() {
            let mut violations = Vec::new();
            let mut flagged = BTreeSet::new();

            for (j, other) in alternatives.iter().enumerate() {
                if i == j {
                    continue;
                }
                for key in other.fields.keys() {
                    if !alt.fields.contains_key(key)
                        && obj.contains_key(key)
                        && flagged.insert(key.as_str())
                    {
                        violations.push(Violation::conflicting(key, &other.name));
                    }
                }
            }

            let normalized = check_fields(obj, &alt.fields, &mut violations);

            if self.extra_fields == ExtraFields::Reject {
                for key in obj.keys() {
                    let declared_anywhere = alternatives.iter().any(|a| a.fields.contains_key(key));
                    if !declared_anywhere {
                        violations.push(Violation::unknown_field(key));
                    }
                }
            }

            if violations.is_empty() {
                return Ok(Value::Object(normalized));
            }

            failures.push(AlternativeFailure {
                alternative: alt.name.clone(),
                violations,
            });
        }

        Err(failures)
    }
}

/// Checks declared fields and returns the normalized object.
fn check_fields(
    obj: &Map<String, Value>,
    fields: &FieldSet,
    violations: &mut Vec<Violation>,
) -> Map<String, Value> {
    let mut normalized = Map::new();

    for (name, def) in fields {
        match obj.get(name) {
            Some(value) => match check_value(name, def, value) {
                Ok(v) => {
                    normalized.insert(name.clone(), v);
                }
                Err(v) => violations.push(v),
            },
            None => {
                if def.required {
                    violations.push(Violation::missing(name));
                }
            }
        }
    }

    normalized
}

/// Checks a single present value against its field definition.
fn check_value(name: &str, def: &FieldDef, value: &Value) -> Result<Value, Violation> {
    let s = value
        .as_str()
        .ok_or_else(|| Violation::wrong_type(name, def.field_type.type_name(), json_type_name(value)))?;

    match def.field_type {
        FieldType::String => {
            if let Some(min) = def.min_length {
                let len = s.chars().count();
                if len < min {
                    return Err(Violation::too_short(name, min, len));
                }
            }
            Ok(Value::String(s.to_string()))
        }
        FieldType::Date => {
            let date = parse_calendar_date(s).ok_or_else(|| Violation::invalid_date(name, s))?;
            Ok(Value::String(date.format("%Y-%m-%d").to_string()))
        }
    }
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar date.
///
/// Timestamps keep the date in their own offset. The date part must be
/// written exactly as `YYYY-MM-DD`: no padding, signs or single-digit fields.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))?;

    let canonical = date.format("%Y-%m-%d").to_string();
    if s.get(..canonical.len()) == Some(canonical.as_str()) {
        Some(date)
    } else {
        None
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::errors::ViolationKind;
    use crate::contract::types::fields;
    use serde_json::json;

    fn setup_registry() -> ContractRegistry {
        let mut registry = ContractRegistry::new();
        registry
            .register(Contract::object(
                "organization.update",
                fields([
                    ("name", FieldDef::required_non_empty()),
                    ("logoR2Key", FieldDef::optional_string()),
                ]),
            ))
            .unwrap();
        registry
            .register(Contract::object(
                "profile.streak_days",
                fields([
                    ("startDate", FieldDef::optional_date()),
                    ("endDate", FieldDef::optional_date()),
                ]),
            ))
            .unwrap();
        registry
            .register(Contract::one_of(
                "practice.request",
                vec![
                    Alternative::new(
                        "by_roleplay_session",
                        fields([("roleplaySessionId", FieldDef::required_non_empty())]),
                    ),
                    Alternative::new(
                        "by_lesson_session",
                        fields([("lessonSessionId", FieldDef::required_non_empty())]),
                    ),
                ],
            ))
            .unwrap();
        registry
    }

    #[test]
    fn test_valid_input_passes() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let out = validator
            .validate("organization.update", &json!({ "name": "Acme", "logoR2Key": "abc" }))
            .unwrap();
        assert_eq!(out, json!({ "name": "Acme", "logoR2Key": "abc" }));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate("organization.update", &json!({ "logoR2Key": "abc" }))
            .unwrap_err();
        assert_eq!(err.code(), "LINGO_CONTRACT_VALIDATION_FAILED");
        assert!(err.to_string().contains("missing required field: name"));
    }

    #[test]
    fn test_all_failures_reported() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate("profile.streak_days", &json!({ "startDate": 5, "endDate": "soon" }))
            .unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(matches!(
            err.violations()[0].kind,
            ViolationKind::InvalidDate { .. }
        ));
        assert_eq!(err.violations()[1].field, "startDate");
    }

    #[test]
    fn test_empty_string_below_min_length() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate("organization.update", &json!({ "name": "" }))
            .unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ViolationKind::TooShort { min: 1, actual: 0 }
        );
    }

    #[test]
    fn test_null_is_wrong_type() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate("organization.update", &json!({ "name": "Acme", "logoR2Key": null }))
            .unwrap_err();
        let v = &err.violations()[0];
        assert_eq!(v.field, "logoR2Key");
        assert_eq!(
            v.kind,
            ViolationKind::WrongType {
                expected: "string".into(),
                actual: "null".into()
            }
        );
    }

    #[test]
    fn test_non_object_root_rejected() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator.validate("organization.update", &json!(["Acme"])).unwrap_err();
        assert_eq!(err.violations()[0].field, "$root");
    }

    #[test]
    fn test_unknown_contract_rejected() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator.validate("post.archive", &json!({})).unwrap_err();
        assert_eq!(err.code(), "LINGO_UNKNOWN_CONTRACT");
    }

    #[test]
    fn test_extra_fields_stripped_by_default() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let out = validator
            .validate("organization.update", &json!({ "name": "Acme", "plan": "pro" }))
            .unwrap();
        assert_eq!(out, json!({ "name": "Acme" }));
    }

    #[test]
    fn test_extra_fields_rejected_in_strict_mode() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry).with_extra_fields(ExtraFields::Reject);

        let err = validator
            .validate("organization.update", &json!({ "name": "Acme", "plan": "pro" }))
            .unwrap_err();
        assert_eq!(err.violations()[0].kind, ViolationKind::UnknownField);
        assert_eq!(err.violations()[0].field, "plan");
    }

    #[test]
    fn test_dates_normalized() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let out = validator
            .validate(
                "profile.streak_days",
                &json!({ "startDate": "2024-05-01T23:30:00-02:00", "endDate": "2024-05-07" }),
            )
            .unwrap();
        assert_eq!(out, json!({ "startDate": "2024-05-01", "endDate": "2024-05-07" }));
    }

    #[test]
    fn test_choice_first_alternative() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let out = validator
            .validate("practice.request", &json!({ "roleplaySessionId": "rp_1" }))
            .unwrap();
        assert_eq!(out, json!({ "roleplaySessionId": "rp_1" }));
    }

    #[test]
    fn test_choice_second_alternative() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let out = validator
            .validate("practice.request", &json!({ "lessonSessionId": "ls_1" }))
            .unwrap();
        assert_eq!(out, json!({ "lessonSessionId": "ls_1" }));
    }

    #[test]
    fn test_choice_both_fails() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate(
                "practice.request",
                &json!({ "roleplaySessionId": "rp_1", "lessonSessionId": "ls_1" }),
            )
            .unwrap_err();
        match &err.violations()[0].kind {
            ViolationKind::NoAlternativeMatched { alternatives } => {
                assert_eq!(alternatives.len(), 2);
                assert_eq!(alternatives[0].alternative, "by_roleplay_session");
                assert_eq!(
                    alternatives[0].violations[0].kind,
                    ViolationKind::ConflictingField {
                        alternative: "by_lesson_session".into()
                    }
                );
            }
            other => panic!("unexpected violation: {:?}", other),
        }
    }

    #[test]
    fn test_choice_neither_fails() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator.validate("practice.request", &json!({})).unwrap_err();
        assert!(err.to_string().contains("no alternative matched"));
        assert!(err.to_string().contains("missing required field: lessonSessionId"));
    }

    #[test]
    fn test_choice_empty_id_fails() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate("practice.request", &json!({ "lessonSessionId": "" }))
            .unwrap_err();
        assert_eq!(err.violations()[0].field, "$root");
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(
            parse_calendar_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(
            parse_calendar_date("2024-03-01T00:15:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_calendar_date("yesterday"), None);
    }

    #[test]
    fn test_parse_calendar_date_rejects_loose_forms() {
        for loose in ["2024-5-1", " 2024-05-01", "+2024-05-01", "2024-05-01 ", "02024-05-01"] {
            assert_eq!(parse_calendar_date(loose), None, "accepted {:?}", loose);
        }
    }

    #[test]
    fn test_loose_date_is_violation_not_rewrite() {
        let registry = setup_registry();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate("profile.streak_days", &json!({ "startDate": "2024-5-1" }))
            .unwrap_err();
        assert_eq!(
            err.violations()[0].kind,
            ViolationKind::InvalidDate {
                value: "2024-5-1".into()
            }
        );
    }
}
