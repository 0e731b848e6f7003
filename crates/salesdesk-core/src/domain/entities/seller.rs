use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Department;
use crate::domain::{DomainError, Field};

/// A member of the sales staff.
///
/// `department` is a copy of a department that already exists; a seller
/// never creates or deletes departments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub birth_date: Option<DateTime<Utc>>,
    pub base_salary: Option<f64>,
    pub department: Option<Department>,
}

impl Seller {
    /// `true` when the record still needs an identity.
    pub fn is_new(&self) -> bool {
        matches!(self.id, None | Some(0))
    }

    pub fn department_id(&self) -> Option<i32> {
        self.department.as_ref().and_then(|d| d.id)
    }

    /// Invariants a stored seller must satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: Field::Name });
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: Field::Email,
            });
        }
        if let Some(salary) = self.base_salary {
            if !salary.is_finite() || salary < 0.0 {
                return Err(DomainError::InvalidValue {
                    field: Field::BaseSalary,
                    reason: format!("{salary} is not a valid salary"),
                });
            }
        }
        Ok(())
    }
}
