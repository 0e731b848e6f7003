//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `salesdesk-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `DepartmentRepository`: Department storage
//!   - `SellerRepository`: Seller storage
//!
//! - **Driving side**: the form controllers in `crate::forms` talk to their
//!   host through `FormWindow` and `DataChangeListener`.

pub mod output;

pub use output::{DepartmentRepository, SellerRepository};

#[cfg(test)]
pub use output::{MockDepartmentRepository, MockSellerRepository};
