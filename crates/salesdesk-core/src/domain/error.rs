// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use super::validation::Field;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the form layer keeps them around for display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: Field },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: Field, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Provide a value for '{field}'"),
            ],
            Self::InvalidValue { field, .. } => vec![
                format!("Check the value entered for '{field}'"),
            ],
        }
    }
}
