//! Infrastructure adapters for SalesDesk.
//!
//! This crate implements the ports defined in `salesdesk-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod json_file;
pub mod memory;
pub mod seed;

// Re-export commonly used adapters
pub use json_file::{JsonDepartmentRepository, JsonFileStore, JsonSellerRepository, JsonStoreError};
pub use memory::{InMemoryDepartmentRepository, InMemorySellerRepository};
pub use seed::{SAMPLE_DEPARTMENTS, SeedTarget, seed_departments};
