//! Application services - orchestrate use cases.
//!
//! Services sit between the form controllers and the storage ports: they
//! decide between insert and update and hand identities back to callers.

pub mod department_service;
pub mod seller_service;

pub use department_service::DepartmentService;
pub use seller_service::SellerService;
