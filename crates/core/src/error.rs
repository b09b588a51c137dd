//! Domain error model.

use thiserror::Error;

use crate::entity::EntityKind;
use crate::validation::ValidationErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing records, lifecycle rules). Storage and gateway concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A candidate record failed validation; carries every field error.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The referenced identifier is not in the collection.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// The requested status change is not an allowed edge.
    #[error("cannot move {id} from {from} to {to}")]
    InvalidTransition { id: String, from: String, to: String },

    /// An identifier was malformed (e.g. wrong prefix).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_transition(
        id: impl Into<String>,
        from: impl core::fmt::Display,
        to: impl core::fmt::Display,
    ) -> Self {
        Self::InvalidTransition {
            id: id.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Field errors, when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
