//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the persistence
//! backend. The `salesdesk-adapters` crate provides implementations.

use crate::domain::{Department, Seller};
use crate::error::SalesdeskResult;

/// Port for department storage.
///
/// Implemented by:
/// - `salesdesk_adapters::InMemoryDepartmentRepository` (testing, ephemeral sessions)
/// - `salesdesk_adapters::JsonDepartmentRepository` (JSON data file)
#[cfg_attr(test, mockall::automock)]
pub trait DepartmentRepository: Send + Sync {
    /// Store a new department and return the identity assigned to it.
    fn insert(&self, department: &Department) -> SalesdeskResult<i32>;

    /// Overwrite an existing department, matched by id.
    fn update(&self, department: &Department) -> SalesdeskResult<()>;

    /// Remove a department by id.
    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()>;

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Department>>;

    /// All departments, ordered by name.
    fn find_all(&self) -> SalesdeskResult<Vec<Department>>;
}

/// Port for seller storage.
#[cfg_attr(test, mockall::automock)]
pub trait SellerRepository: Send + Sync {
    /// Store a new seller and return the identity assigned to it.
    fn insert(&self, seller: &Seller) -> SalesdeskResult<i32>;

    /// Overwrite an existing seller, matched by id.
    fn update(&self, seller: &Seller) -> SalesdeskResult<()>;

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()>;

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Seller>>;

    /// All sellers, ordered by name.
    fn find_all(&self) -> SalesdeskResult<Vec<Seller>>;

    /// Sellers assigned to the given department, ordered by name.
    fn find_by_department(&self, department_id: i32) -> SalesdeskResult<Vec<Seller>>;
}
