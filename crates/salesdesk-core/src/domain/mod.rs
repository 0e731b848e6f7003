// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for SalesDesk.
//!
//! This module contains the business records and their validation rules.
//! Persistence is reached through ports defined in the application layer.
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **Plain records**: Entities are Clone + PartialEq
//! - **Accumulating validation**: every field is checked before failing
pub mod entities;
pub mod error;
pub mod validation;

pub use entities::{Department, Seller};
pub use error::DomainError;
pub use validation::{EMPTY_FIELD_MESSAGE, Field, ValidationError, require_text};
