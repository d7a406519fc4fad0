//! Request contract subsystem
//!
//! Every backend API operation declares the shape of its input as a contract.
//! Route handlers validate raw request bodies here before business logic runs.
//!
//! # Design Principles
//!
//! - Contracts are built once at startup and never mutated
//! - Validation is pure and deterministic
//! - Violations are reported per field, never coerced
//! - All-or-nothing: a request is either fully valid or rejected
//! - Choices between shapes are decided structurally, in declaration order

pub mod catalog;
mod errors;
mod registry;
mod requests;
mod types;
mod validator;

pub use catalog::ProfileResource;
pub use errors::{
    AlternativeFailure, ContractError, ContractResult, Severity, Violation, ViolationKind,
    Violations,
};
pub use registry::ContractRegistry;
pub use requests::{
    AuthMeUpdate, ContractRequest, OrganizationScopedQuery, OrganizationUpdate, PostCreate,
    PostDelete, PostGetById, PracticeRequest, RoleplaySessionCreate, RoleplaySessionGet,
    StreakDaysQuery, UpdateStreakDay,
};
pub use types::{fields, Alternative, Contract, FieldDef, FieldSet, FieldType, Shape};
pub use validator::{parse_calendar_date, ContractValidator, ExtraFields};
