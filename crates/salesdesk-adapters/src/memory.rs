//! In-memory record stores.
//!
//! Thread-safe and ephemeral. Used for `storage.backend = "memory"` sessions
//! and in tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use salesdesk_core::{
    application::{
        ApplicationError,
        ports::{DepartmentRepository, SellerRepository},
    },
    domain::{Department, Seller},
    error::SalesdeskResult,
};
use tracing::debug;

use crate::seed::SeedTarget;

/// Rows keyed by id plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    next_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug)]
struct Shared<T>(Arc<RwLock<Table<T>>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self(Arc::new(RwLock::new(Table::default())))
    }
}

impl<T> Shared<T> {
    fn read(&self) -> SalesdeskResult<RwLockReadGuard<'_, Table<T>>> {
        Ok(self
            .0
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> SalesdeskResult<RwLockWriteGuard<'_, Table<T>>> {
        Ok(self
            .0
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

/// Thread-safe in-memory department store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDepartmentRepository {
    inner: Shared<Department>,
}

impl InMemoryDepartmentRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of departments.
    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.rows.len()).unwrap_or_default()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeedTarget for InMemoryDepartmentRepository {
    fn is_fresh(&self) -> SalesdeskResult<bool> {
        Ok(self.inner.read()?.next_id == 1)
    }
}

impl DepartmentRepository for InMemoryDepartmentRepository {
    fn insert(&self, department: &Department) -> SalesdeskResult<i32> {
        department.validate()?;

        let mut table = self.inner.write()?;
        let id = table.allocate_id();
        table.rows.insert(
            id,
            Department {
                id: Some(id),
                ..department.clone()
            },
        );
        debug!(id, "Department row inserted");
        Ok(id)
    }

    fn update(&self, department: &Department) -> SalesdeskResult<()> {
        department.validate()?;

        let id = department.id.unwrap_or_default();
        let mut table = self.inner.write()?;
        let row = table.rows.get_mut(&id).ok_or(ApplicationError::NotFound {
            entity: "Department",
            id,
        })?;
        *row = department.clone();
        Ok(())
    }

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()> {
        let mut table = self.inner.write()?;
        table.rows.remove(&id).ok_or(ApplicationError::NotFound {
            entity: "Department",
            id,
        })?;
        Ok(())
    }

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Department>> {
        Ok(self.inner.read()?.rows.get(&id).cloned())
    }

    fn find_all(&self) -> SalesdeskResult<Vec<Department>> {
        let mut all: Vec<_> = self.inner.read()?.rows.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

/// Thread-safe in-memory seller store.
///
/// Sellers keep the department they were saved with; renaming a department
/// afterwards is not reflected here.
#[derive(Debug, Clone, Default)]
pub struct InMemorySellerRepository {
    inner: Shared<Seller>,
}

impl InMemorySellerRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sellers.
    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.rows.len()).unwrap_or_default()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn collect_sorted(&self, keep: impl Fn(&Seller) -> bool) -> SalesdeskResult<Vec<Seller>> {
        let mut sellers: Vec<_> = self
            .inner
            .read()?
            .rows
            .values()
            .filter(|s| keep(s))
            .cloned()
            .collect();
        sellers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(sellers)
    }
}

impl SellerRepository for InMemorySellerRepository {
    fn insert(&self, seller: &Seller) -> SalesdeskResult<i32> {
        seller.validate()?;

        let mut table = self.inner.write()?;
        let id = table.allocate_id();
        table.rows.insert(
            id,
            Seller {
                id: Some(id),
                ..seller.clone()
            },
        );
        debug!(id, "Seller row inserted");
        Ok(id)
    }

    fn update(&self, seller: &Seller) -> SalesdeskResult<()> {
        seller.validate()?;

        let id = seller.id.unwrap_or_default();
        let mut table = self.inner.write()?;
        let row = table.rows.get_mut(&id).ok_or(ApplicationError::NotFound {
            entity: "Seller",
            id,
        })?;
        *row = seller.clone();
        Ok(())
    }

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()> {
        let mut table = self.inner.write()?;
        table.rows.remove(&id).ok_or(ApplicationError::NotFound {
            entity: "Seller",
            id,
        })?;
        Ok(())
    }

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Seller>> {
        Ok(self.inner.read()?.rows.get(&id).cloned())
    }

    fn find_all(&self) -> SalesdeskResult<Vec<Seller>> {
        self.collect_sorted(|_| true)
    }

    fn find_by_department(&self, department_id: i32) -> SalesdeskResult<Vec<Seller>> {
        self.collect_sorted(|s| s.department_id() == Some(department_id))
    }
}
