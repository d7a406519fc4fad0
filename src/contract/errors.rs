//! Contract error types
//!
//! Error codes:
//! - LINGO_UNKNOWN_CONTRACT (REJECT)
//! - LINGO_CONTRACT_VALIDATION_FAILED (REJECT)
//! - LINGO_CONTRACT_IMMUTABLE (FATAL)
//! - LINGO_CONTRACT_MALFORMED (FATAL)
//! - LINGO_CONTRACT_TYPE_MISMATCH (FATAL)

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Severity levels for contract errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected; the caller decides how to answer its own client
    Reject,
    /// Contract set is unusable; startup must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Why a single field failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent
    Missing,
    /// Present with the wrong JSON type
    WrongType { expected: String, actual: String },
    /// String shorter than the declared minimum
    TooShort { min: usize, actual: usize },
    /// String that does not parse as a calendar date
    InvalidDate { value: String },
    /// Undeclared field (strict mode only)
    UnknownField,
    /// Field that belongs to another alternative of a choice
    ConflictingField { alternative: String },
    /// No alternative of a choice matched
    NoAlternativeMatched { alternatives: Vec<AlternativeFailure> },
}

/// Violations collected while trying one alternative
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeFailure {
    pub alternative: String,
    pub violations: Vec<Violation>,
}

/// A single field-level failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field name, or `$root` for the input as a whole
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::Missing)
    }

    pub fn wrong_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            ViolationKind::WrongType {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    pub fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        Self::new(field, ViolationKind::TooShort { min, actual })
    }

    pub fn invalid_date(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            field,
            ViolationKind::InvalidDate {
                value: value.into(),
            },
        )
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::UnknownField)
    }

    pub fn conflicting(field: impl Into<String>, alternative: impl Into<String>) -> Self {
        Self::new(
            field,
            ViolationKind::ConflictingField {
                alternative: alternative.into(),
            },
        )
    }

    pub fn no_alternative(alternatives: Vec<AlternativeFailure>) -> Self {
        Self::new("$root", ViolationKind::NoAlternativeMatched { alternatives })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "missing required field: {}", self.field),
            ViolationKind::WrongType { expected, actual } => write!(
                f,
                "field '{}': expected {}, got {}",
                self.field, expected, actual
            ),
            ViolationKind::TooShort { min, actual } => write!(
                f,
                "field '{}': length {} is below minimum {}",
                self.field, actual, min
            ),
            ViolationKind::InvalidDate { value } => {
                write!(f, "field '{}': '{}' is not a valid date", self.field, value)
            }
            ViolationKind::UnknownField => write!(f, "unexpected field: {}", self.field),
            ViolationKind::ConflictingField { alternative } => write!(
                f,
                "field '{}' belongs to alternative '{}'",
                self.field, alternative
            ),
            ViolationKind::NoAlternativeMatched { alternatives } => {
                write!(f, "no alternative matched")?;
                for alt in alternatives {
                    write!(f, " [{}: {}]", alt.alternative, Violations(alt.violations.clone()))?;
                }
                Ok(())
            }
        }
    }
}

/// Ordered list of violations for one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(pub Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// Contract errors
#[derive(Debug, Clone, Error)]
pub enum ContractError {
    /// No contract registered under this name
    #[error("Contract '{0}' not found")]
    UnknownContract(String),

    /// Input does not satisfy the contract
    #[error("Request rejected by contract '{contract}': {violations}")]
    ValidationFailed {
        contract: String,
        violations: Violations,
    },

    /// A contract with this name is already registered
    #[error("Contract '{0}' is already registered")]
    ContractImmutable(String),

    /// Contract definition could not be read or is structurally invalid
    #[error("Malformed contract '{source_name}': {reason}")]
    MalformedContract { source_name: String, reason: String },

    /// Validated value does not fit the requested Rust type
    #[error("Contract '{contract}' does not produce the requested type: {reason}")]
    TypeMismatch { contract: String, reason: String },
}

impl ContractError {
    pub fn validation_failed(contract: impl Into<String>, violations: Vec<Violation>) -> Self {
        ContractError::ValidationFailed {
            contract: contract.into(),
            violations: Violations(violations),
        }
    }

    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        ContractError::MalformedContract {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::UnknownContract(_) => "LINGO_UNKNOWN_CONTRACT",
            ContractError::ValidationFailed { .. } => "LINGO_CONTRACT_VALIDATION_FAILED",
            ContractError::ContractImmutable(_) => "LINGO_CONTRACT_IMMUTABLE",
            ContractError::MalformedContract { .. } => "LINGO_CONTRACT_MALFORMED",
            ContractError::TypeMismatch { .. } => "LINGO_CONTRACT_TYPE_MISMATCH",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ContractError::UnknownContract(_) | ContractError::ValidationFailed { .. } => {
                Severity::Reject
            }
            _ => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Field-level violations; empty for errors that are not validation failures
    pub fn violations(&self) -> &[Violation] {
        match self {
            ContractError::ValidationFailed { violations, .. } => &violations.0,
            _ => &[],
        }
    }
}

/// Result type for contract operations
pub type ContractResult<T> = Result<T, ContractError>;
