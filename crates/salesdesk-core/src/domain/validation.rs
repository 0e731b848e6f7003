//! Field-level validation failures.
//!
//! A [`ValidationError`] collects one message per form field. Validation
//! never stops at the first failure: every field is checked and the caller
//! gets the whole set back at once.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Message used for required input that was left blank.
pub const EMPTY_FIELD_MESSAGE: &str = "Field can't be empty";

/// Form fields that can carry a validation message.
///
/// The string keys are stable; they are what the form layer uses to route a
/// message to its error label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Name,
    Email,
    BirthDate,
    BaseSalary,
    Department,
}

impl Field {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Email => "email",
            Self::BirthDate => "birthDate",
            Self::BaseSalary => "baseSalary",
            Self::Department => "department",
        }
    }

    /// Reverse lookup from a stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "birthDate" => Some(Self::BirthDate),
            "baseSalary" => Some(Self::BaseSalary),
            "department" => Some(Self::Department),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accumulated field errors.
///
/// Holds at most one message per field; flagging a field twice keeps the
/// last message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Validation Error")]
pub struct ValidationError {
    errors: BTreeMap<Field, String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn add_error(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(value)` when nothing was flagged, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Flag `field` when `text` is blank (empty or whitespace only).
pub fn require_text(errors: &mut ValidationError, field: Field, text: &str) {
    if text.trim().is_empty() {
        errors.add_error(field, EMPTY_FIELD_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut errors = ValidationError::new();
        errors.add_error(Field::Name, "first");
        errors.add_error(Field::Name, "second");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some("second"));
    }

    #[test]
    fn into_result_passes_value_through_when_empty() {
        assert_eq!(ValidationError::new().into_result(7), Ok(7));
    }

    #[test]
    fn into_result_returns_errors_when_flagged() {
        let mut errors = ValidationError::new();
        errors.add_error(Field::Email, EMPTY_FIELD_MESSAGE);

        let err = errors.into_result(()).unwrap_err();
        assert!(err.contains(Field::Email));
        assert_eq!(err.to_string(), "Validation Error");
    }

    #[test]
    fn require_text_treats_whitespace_as_blank() {
        let mut errors = ValidationError::new();
        require_text(&mut errors, Field::Name, "   \t");
        require_text(&mut errors, Field::Email, " a ");

        assert_eq!(errors.get(Field::Name), Some(EMPTY_FIELD_MESSAGE));
        assert!(!errors.contains(Field::Email));
    }

    #[test]
    fn keys_round_trip() {
        for field in [
            Field::Id,
            Field::Name,
            Field::Email,
            Field::BirthDate,
            Field::BaseSalary,
            Field::Department,
        ] {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("salary"), None);
    }
}
