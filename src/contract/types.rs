//! Contract type definitions
//!
//! Supported field types:
//! - string: UTF-8 string, optionally with a minimum length
//! - date: ISO calendar date or RFC 3339 timestamp carried as a string
//!
//! A contract is either a plain object shape or a structural choice between
//! alternative object shapes (no explicit tag on the wire).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Contract names are dotted lowercase segments, e.g. `profile.lessons.get_all`.
const CONTRACT_NAME_PATTERN: &str = r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$";

static CONTRACT_NAME: OnceLock<Regex> = OnceLock::new();

fn contract_name_regex() -> &'static Regex {
    CONTRACT_NAME.get_or_init(|| {
        Regex::new(CONTRACT_NAME_PATTERN).expect("contract name pattern is a valid regex")
    })
}

/// Primitive field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Calendar date, accepted as `YYYY-MM-DD` or an RFC 3339 timestamp
    Date,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Date => "date",
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
    /// Minimum length in characters (strings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

impl FieldDef {
    /// Create a required string field
    pub fn required_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: true,
            min_length: None,
        }
    }

    /// Create a required string field that must not be empty
    pub fn required_non_empty() -> Self {
        Self::required_string().with_min_length(1)
    }

    /// Create an optional string field
    pub fn optional_string() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            min_length: None,
        }
    }

    /// Create an optional date field
    pub fn optional_date() -> Self {
        Self {
            field_type: FieldType::Date,
            required: false,
            min_length: None,
        }
    }

    /// Create a required date field
    pub fn required_date() -> Self {
        Self {
            field_type: FieldType::Date,
            required: true,
            min_length: None,
        }
    }

    /// Sets the minimum length constraint
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }
}

/// Declared fields, ordered by name so that violations come out in a stable order
pub type FieldSet = BTreeMap<String, FieldDef>;

/// Builds a field set from `(name, def)` pairs.
pub fn fields<const N: usize>(defs: [(&str, FieldDef); N]) -> FieldSet {
    defs.into_iter()
        .map(|(name, def)| (name.to_string(), def))
        .collect()
}

/// One alternative of a structural choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alternative {
    /// Alternative label used in error reports, e.g. `by_lesson_session`
    pub name: String,
    /// Fields of this alternative
    pub fields: FieldSet,
}

impl Alternative {
    pub fn new(name: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Accepted input shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// A single object shape
    Object { fields: FieldSet },
    /// Exactly one of several object shapes, tried in order
    OneOf { alternatives: Vec<Alternative> },
}

/// Complete contract definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique contract name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accepted shape
    #[serde(flatten)]
    pub shape: Shape,
}

impl Contract {
    /// Create an object contract
    pub fn object(name: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            name: name.into(),
            description: None,
            shape: Shape::Object { fields },
        }
    }

    /// Create a structural choice contract
    pub fn one_of(name: impl Into<String>, alternatives: Vec<Alternative>) -> Self {
        Self {
            name: name.into(),
            description: None,
            shape: Shape::OneOf { alternatives },
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the contract definition itself (not an input)
    pub fn validate_structure(&self) -> Result<(), String> {
        if !contract_name_regex().is_match(&self.name) {
            return Err(format!(
                "Contract name '{}' must be dotted lowercase segments",
                self.name
            ));
        }

        match &self.shape {
            Shape::Object { fields } => check_fields(fields),
            Shape::OneOf { alternatives } => {
                if alternatives.len() < 2 {
                    return Err("A one_of contract needs at least two alternatives".into());
                }
                for (i, alt) in alternatives.iter().enumerate() {
                    if alt.fields.is_empty() {
                        return Err(format!("Alternative '{}' declares no fields", alt.name));
                    }
                    if alternatives[..i].iter().any(|prev| prev.name == alt.name) {
                        return Err(format!("Alternative '{}' is declared twice", alt.name));
                    }
                    check_fields(&alt.fields)?;
                }
                Ok(())
            }
        }
    }
}

fn check_fields(fields: &FieldSet) -> Result<(), String> {
    for (name, def) in fields {
        if name.is_empty() {
            return Err("Field names must not be empty".into());
        }
        if def.field_type != FieldType::String && def.min_length.is_some() {
            return Err(format!(
                "Field '{}': min_length only applies to string fields",
                name
            ));
        }
    }
    Ok(())
}
