//! Built-in API contracts
//!
//! One contract per backend operation. Wire field names are camelCase.

use serde::{Deserialize, Serialize};

use super::types::{fields, Alternative, Contract, FieldDef};

pub const AUTH_ME_UPDATE: &str = "auth.me.update";
pub const ORGANIZATION_UPDATE: &str = "organization.update";
pub const POST_CREATE: &str = "post.create";
pub const POST_GET_BY_ID: &str = "post.get_by_id";
pub const POST_DELETE: &str = "post.delete";
pub const ROLEPLAY_SESSION_CREATE: &str = "roleplay_session.create";
pub const ROLEPLAY_SESSION_GET: &str = "roleplay_session.get";
pub const PROFILE_STREAK_DAYS: &str = "profile.streak_days";
pub const PROFILE_UPDATE_STREAK_DAY: &str = "profile.update_streak_day";
pub const PRACTICE_REQUEST: &str = "practice.request";

/// Resources a profile can list for one organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileResource {
    Lessons,
    Categories,
    Sessions,
    Roleplays,
    Vocabulary,
}

impl ProfileResource {
    pub const ALL: [ProfileResource; 5] = [
        ProfileResource::Lessons,
        ProfileResource::Categories,
        ProfileResource::Sessions,
        ProfileResource::Roleplays,
        ProfileResource::Vocabulary,
    ];

    /// Name of the organization-scoped "get all" contract for this resource
    pub fn get_all_contract(&self) -> &'static str {
        match self {
            ProfileResource::Lessons => "profile.lessons.get_all",
            ProfileResource::Categories => "profile.categories.get_all",
            ProfileResource::Sessions => "profile.sessions.get_all",
            ProfileResource::Roleplays => "profile.roleplays.get_all",
            ProfileResource::Vocabulary => "profile.vocabulary.get_all",
        }
    }
}

/// Shape shared by every organization-scoped query
fn organization_scoped(name: &str) -> Contract {
    Contract::object(name, fields([("organizationId", FieldDef::required_non_empty())]))
}

/// Returns every built-in contract.
pub fn builtin_contracts() -> Vec<Contract> {
    let mut contracts = vec![
        Contract::object(
            AUTH_ME_UPDATE,
            fields([
                ("name", FieldDef::optional_string()),
                ("timezone", FieldDef::optional_string()),
            ]),
        )
        .with_description("Update the signed-in user's own profile"),
        Contract::object(
            ORGANIZATION_UPDATE,
            fields([
                ("name", FieldDef::required_non_empty()),
                ("logoR2Key", FieldDef::optional_string()),
            ]),
        )
        .with_description("Rename an organization and optionally replace its logo"),
        Contract::object(
            POST_CREATE,
            fields([
                ("title", FieldDef::required_string()),
                ("content", FieldDef::optional_string()),
            ]),
        ),
        Contract::object(POST_GET_BY_ID, fields([("postId", FieldDef::required_string())])),
        Contract::object(POST_DELETE, fields([("postId", FieldDef::required_string())])),
        Contract::object(
            ROLEPLAY_SESSION_CREATE,
            fields([("scenarioId", FieldDef::required_non_empty())]),
        )
        .with_description("Start a roleplay session for a scenario"),
        Contract::object(
            ROLEPLAY_SESSION_GET,
            fields([("roleplaySessionId", FieldDef::required_non_empty())]),
        ),
        Contract::object(
            PROFILE_STREAK_DAYS,
            fields([
                ("startDate", FieldDef::optional_date()),
                ("endDate", FieldDef::optional_date()),
            ]),
        )
        .with_description("List practice streak days, optionally within a date range"),
        organization_scoped(PROFILE_UPDATE_STREAK_DAY)
            .with_description("Mark today as a streak day for an organization"),
        Contract::one_of(
            PRACTICE_REQUEST,
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
        )
        .with_description("Open a practice session for either a roleplay or a lesson session"),
    ];

    contracts.extend(
        ProfileResource::ALL
            .iter()
            .map(|r| organization_scoped(r.get_all_contract())),
    );

    contracts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_unique() {
        let contracts = builtin_contracts();
        let names: HashSet<_> = contracts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), contracts.len());
        assert_eq!(contracts.len(), 15);
    }

    #[test]
    fn test_catalog_structurally_valid() {
        for contract in builtin_contracts() {
            assert!(
                contract.validate_structure().is_ok(),
                "{} is malformed",
                contract.name
            );
        }
    }

    #[test]
    fn test_profile_resource_contract_names() {
        assert_eq!(
            ProfileResource::Vocabulary.get_all_contract(),
            "profile.vocabulary.get_all"
        );
        assert_eq!(ProfileResource::ALL.len(), 5);
    }
}
