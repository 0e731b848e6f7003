//! Wiring of record stores and services from configuration.

use std::sync::Arc;

use tracing::{debug, instrument};

use salesdesk_adapters::{
    InMemoryDepartmentRepository, InMemorySellerRepository, JsonFileStore, seed_departments,
};
use salesdesk_core::application::{DepartmentService, SellerService};

use crate::{
    config::{AppConfig, StorageBackend},
    error::CliResult,
};

/// The services every record command works with.
pub struct Services {
    pub departments: Arc<DepartmentService>,
    pub sellers: Arc<SellerService>,
}

impl Services {
    /// Open the configured backend and build both services over it.
    #[instrument(skip_all, fields(backend = ?config.storage.backend))]
    pub fn open(config: &AppConfig) -> CliResult<Self> {
        let services = match config.storage.backend {
            StorageBackend::Json => {
                let store = JsonFileStore::open(&config.storage.path)?;
                if config.storage.seed {
                    seed_departments(&store.departments())?;
                }
                Self::build(
                    DepartmentService::new(Box::new(store.departments()))
                        .with_seller_lookup(Box::new(store.sellers())),
                    SellerService::new(Box::new(store.sellers())),
                )
            }
            StorageBackend::Memory => {
                let departments = InMemoryDepartmentRepository::new();
                let sellers = InMemorySellerRepository::new();
                if config.storage.seed {
                    seed_departments(&departments)?;
                }
                Self::build(
                    DepartmentService::new(Box::new(departments))
                        .with_seller_lookup(Box::new(sellers.clone())),
                    SellerService::new(Box::new(sellers)),
                )
            }
        };
        debug!("Services ready");
        Ok(services)
    }

    fn build(departments: DepartmentService, sellers: SellerService) -> Self {
        Self {
            departments: Arc::new(departments),
            sellers: Arc::new(sellers),
        }
    }
}
