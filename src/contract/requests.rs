//! Strongly typed request values
//!
//! Each type is produced from the normalized output of its contract, so
//! required fields are present and constrained strings already meet their
//! minimum length.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::catalog;

/// A request type bound to exactly one contract
pub trait ContractRequest: DeserializeOwned {
    /// Name of the contract that validates this request
    const CONTRACT: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMeUpdate {
    pub name: Option<String>,
    pub timezone: Option<String>,
}

impl ContractRequest for AuthMeUpdate {
    const CONTRACT: &'static str = catalog::AUTH_ME_UPDATE;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUpdate {
    pub name: String,
    pub logo_r2_key: Option<String>,
}

impl ContractRequest for OrganizationUpdate {
    const CONTRACT: &'static str = catalog::ORGANIZATION_UPDATE;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub title: String,
    pub content: Option<String>,
}

impl ContractRequest for PostCreate {
    const CONTRACT: &'static str = catalog::POST_CREATE;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostGetById {
    pub post_id: String,
}

impl ContractRequest for PostGetById {
    const CONTRACT: &'static str = catalog::POST_GET_BY_ID;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDelete {
    pub post_id: String,
}

impl ContractRequest for PostDelete {
    const CONTRACT: &'static str = catalog::POST_DELETE;
}

/// Input of every organization-scoped "get all" query.
///
/// Shared by several contracts, so it is parsed with
/// `validate_as(resource.get_all_contract(), ..)` rather than `parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationScopedQuery {
    pub organization_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleplaySessionCreate {
    pub scenario_id: String,
}

impl ContractRequest for RoleplaySessionCreate {
    const CONTRACT: &'static str = catalog::ROLEPLAY_SESSION_CREATE;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleplaySessionGet {
    pub roleplay_session_id: String,
}

impl ContractRequest for RoleplaySessionGet {
    const CONTRACT: &'static str = catalog::ROLEPLAY_SESSION_GET;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakDaysQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ContractRequest for StreakDaysQuery {
    const CONTRACT: &'static str = catalog::PROFILE_STREAK_DAYS;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStreakDay {
    pub organization_id: String,
}

impl ContractRequest for UpdateStreakDay {
    const CONTRACT: &'static str = catalog::PROFILE_UPDATE_STREAK_DAY;
}

/// Practice session target, decided by which identifier the input carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PracticeRequest {
    RoleplaySession {
        #[serde(rename = "roleplaySessionId")]
        roleplay_session_id: String,
    },
    LessonSession {
        #[serde(rename = "lessonSessionId")]
        lesson_session_id: String,
    },
}

impl PracticeRequest {
    /// Returns the identifier regardless of variant
    pub fn session_id(&self) -> &str {
        match self {
            PracticeRequest::RoleplaySession {
                roleplay_session_id,
            } => roleplay_session_id,
            PracticeRequest::LessonSession { lesson_session_id } => lesson_session_id,
        }
    }
}

impl ContractRequest for PracticeRequest {
    const CONTRACT: &'static str = catalog::PRACTICE_REQUEST;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractRegistry, ContractValidator, ProfileResource};
    use serde_json::json;

    #[test]
    fn test_parse_organization_update() {
        let registry = ContractRegistry::builtin().unwrap();
        let validator = ContractValidator::new(&registry);

        let req: OrganizationUpdate = validator
            .parse(&json!({ "name": "Acme", "logoR2Key": "logos/acme.png" }))
            .unwrap();
        assert_eq!(
            req,
            OrganizationUpdate {
                name: "Acme".into(),
                logo_r2_key: Some("logos/acme.png".into()),
            }
        );
    }

    #[test]
    fn test_parse_optional_fields_absent() {
        let registry = ContractRegistry::builtin().unwrap();
        let validator = ContractValidator::new(&registry);

        let req: AuthMeUpdate = validator.parse(&json!({})).unwrap();
        assert_eq!(req.name, None);
        assert_eq!(req.timezone, None);
    }

    #[test]
    fn test_parse_streak_days() {
        let registry = ContractRegistry::builtin().unwrap();
        let validator = ContractValidator::new(&registry);

        let req: StreakDaysQuery = validator
            .parse(&json!({ "startDate": "2024-05-01T08:00:00Z" }))
            .unwrap();
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(req.end_date, None);
    }

    #[test]
    fn test_parse_practice_variants() {
        let registry = ContractRegistry::builtin().unwrap();
        let validator = ContractValidator::new(&registry);

        let by_roleplay: PracticeRequest = validator
            .parse(&json!({ "roleplaySessionId": "rp_9" }))
            .unwrap();
        assert_eq!(
            by_roleplay,
            PracticeRequest::RoleplaySession {
                roleplay_session_id: "rp_9".into()
            }
        );

        let by_lesson: PracticeRequest = validator
            .parse(&json!({ "lessonSessionId": "ls_4", "source": "widget" }))
            .unwrap();
        assert_eq!(by_lesson.session_id(), "ls_4");
        assert!(matches!(by_lesson, PracticeRequest::LessonSession { .. }));
    }

    #[test]
    fn test_organization_scoped_query_per_resource() {
        let registry = ContractRegistry::builtin().unwrap();
        let validator = ContractValidator::new(&registry);

        for resource in ProfileResource::ALL {
            let query: OrganizationScopedQuery = validator
                .validate_as(resource.get_all_contract(), &json!({ "organizationId": "org_1" }))
                .unwrap();
            assert_eq!(query.organization_id, "org_1");
        }
    }

    #[test]
    fn test_mismatched_type_reported() {
        let registry = ContractRegistry::builtin().unwrap();
        let validator = ContractValidator::new(&registry);

        let err = validator
            .validate_as::<PostCreate>(catalog::POST_GET_BY_ID, &json!({ "postId": "p1" }))
            .unwrap_err();
        assert_eq!(err.code(), "LINGO_CONTRACT_TYPE_MISMATCH");
    }
}
