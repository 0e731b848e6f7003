use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Field};

/// An organizational department.
///
/// `id` is assigned by the persistence layer; `None` (or zero) means the
/// record has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<i32>,
    pub name: String,
}

impl Department {
    pub fn new(id: Option<i32>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// `true` when the record still needs an identity.
    pub fn is_new(&self) -> bool {
        matches!(self.id, None | Some(0))
    }

    /// Invariants a stored department must satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: Field::Name });
        }
        Ok(())
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
