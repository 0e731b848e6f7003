//! SalesDesk Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain, application and form layers for
//! SalesDesk, a data-entry tool for departments and sales staff.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         salesdesk-cli (terminal)          │
//! │   (Hosts the forms, implements FormWindow)│
//! └──────────────────┬──────────────────────┘
//!                    │ drives
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │              Forms                        │
//! │ (DepartmentFormController, SellerForm...) │
//! │  Validate, save, notify, close            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (DepartmentService, SellerService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)           │
//! │ (DepartmentRepository, SellerRepository)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    salesdesk-adapters (Infrastructure)    │
//! │     (in-memory and JSON file stores)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use salesdesk_core::prelude::*;
//!
//! # fn demo(repository: Box<dyn DepartmentRepository>, window: &dyn FormWindow) {
//! let service = Arc::new(DepartmentService::new(repository));
//!
//! let mut controller = DepartmentFormController::new(DepartmentForm::new());
//! controller.set_department_service(service);
//! controller.set_entity(Department::default());
//! controller.update_form_data();
//!
//! controller.form_mut().name.set_text("Books");
//! let outcome = controller.on_save_action(window);
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod forms;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, DepartmentService, SellerService,
        ports::{DepartmentRepository, SellerRepository},
    };
    pub use crate::domain::{Department, DomainError, Field, Seller, ValidationError};
    pub use crate::error::{SalesdeskError, SalesdeskResult};
    pub use crate::forms::{
        Alert, AlertKind, DataChangeListener, DepartmentForm, DepartmentFormController,
        EntityForm, FormWindow, SaveOutcome, SellerForm, SellerFormController,
    };
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
