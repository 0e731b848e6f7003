//! Sample data for a fresh store.

use salesdesk_core::{
    application::ports::DepartmentRepository, domain::Department, error::SalesdeskResult,
};
use tracing::{debug, info};

/// Departments written by `storage.seed` into a fresh store.
pub const SAMPLE_DEPARTMENTS: [&str; 4] = ["Computers", "Electronics", "Fashion", "Books"];

/// A department store that knows whether it has ever held a department.
pub trait SeedTarget: DepartmentRepository {
    /// `true` until the first department id has been issued. Deleting
    /// departments does not make a store fresh again.
    fn is_fresh(&self) -> SalesdeskResult<bool>;
}

/// Insert [`SAMPLE_DEPARTMENTS`] into a fresh store.
///
/// Returns the number of departments inserted.
pub fn seed_departments<R: SeedTarget + ?Sized>(repository: &R) -> SalesdeskResult<usize> {
    if !repository.is_fresh()? {
        debug!("Store already used, not seeding");
        return Ok(0);
    }

    for name in SAMPLE_DEPARTMENTS {
        repository.insert(&Department::new(None, name))?;
    }
    info!(count = SAMPLE_DEPARTMENTS.len(), "Sample departments added");
    Ok(SAMPLE_DEPARTMENTS.len())
}
