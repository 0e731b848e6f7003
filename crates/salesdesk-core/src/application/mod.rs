//! Application layer for SalesDesk.
//!
//! This layer contains:
//! - **Services**: Persistence use cases (DepartmentService, SellerService)
//! - **Ports**: Interface definitions (traits) for storage backends
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{DepartmentService, SellerService};

// Re-export port traits (for adapter implementation)
pub use ports::{DepartmentRepository, SellerRepository};

pub use error::ApplicationError;
