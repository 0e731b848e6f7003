//! Application layer errors.
//!
//! These errors represent failures in orchestration and storage, not
//! business rules. Business rule violations are `DomainError` from
//! `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while talking to the persistence backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The backend rejected or failed an operation.
    #[error("{message}")]
    Storage { message: String },

    /// Store access failed (lock poisoned).
    #[error("Record store is unavailable")]
    StoreLockError,

    /// No record with the requested identity.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// The operation would leave dangling references.
    #[error("Integrity violation: {message}")]
    Integrity { message: String },
}

impl ApplicationError {
    /// Shorthand for a storage fault with a message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Storage { message } => vec![
                format!("The data store reported: {}", message),
                "Check that the data file is readable and writable".into(),
                "Try the operation again".into(),
            ],
            Self::StoreLockError => vec![
                "The record store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::NotFound { entity, .. } => vec![
                format!("No such {} exists", entity.to_lowercase()),
                "List existing records with: salesdesk department list / salesdesk seller list"
                    .into(),
            ],
            Self::Integrity { .. } => vec![
                "Reassign or remove the sellers of this department first".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Storage { .. } | Self::StoreLockError => ErrorCategory::Storage,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Integrity { .. } => ErrorCategory::Validation,
        }
    }
}
