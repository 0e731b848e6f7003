//! JSON data file store.
//!
//! The whole data set lives in one document:
//!
//! ```json
//! {
//!   "departments": [{ "id": 1, "name": "Books" }],
//!   "sellers": [{ "id": 1, "name": "Alex", "department": { "id": 1, "name": "Books" }, ... }],
//!   "next_department_id": 2,
//!   "next_seller_id": 2
//! }
//! ```
//!
//! The document is read once by [`JsonFileStore::open`] and rewritten after
//! every successful mutation. A mutation that cannot be written leaves the
//! in-memory copy untouched.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use salesdesk_core::{
    application::{
        ApplicationError,
        ports::{DepartmentRepository, SellerRepository},
    },
    domain::{Department, Seller},
    error::{SalesdeskError, SalesdeskResult},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::seed::SeedTarget;

/// Failures reading or writing the data file.
#[derive(Debug, Error)]
pub enum JsonStoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid data file: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode data file: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<JsonStoreError> for ApplicationError {
    fn from(err: JsonStoreError) -> Self {
        ApplicationError::storage(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    departments: Vec<Department>,
    #[serde(default)]
    sellers: Vec<Seller>,
    #[serde(default = "first_id")]
    next_department_id: i32,
    #[serde(default = "first_id")]
    next_seller_id: i32,
}

fn first_id() -> i32 {
    1
}

impl Default for Document {
    fn default() -> Self {
        Self {
            departments: Vec::new(),
            sellers: Vec::new(),
            next_department_id: first_id(),
            next_seller_id: first_id(),
        }
    }
}

impl Document {
    fn department(&self, id: i32) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == Some(id))
    }

    /// Seller with its department replaced by the current row, so renames show up.
    fn resolve(&self, seller: &Seller) -> Seller {
        let mut seller = seller.clone();
        if let Some(current) = seller.department_id().and_then(|id| self.department(id)) {
            seller.department = Some(current.clone());
        }
        seller
    }
}

/// A record store backed by a single JSON file.
///
/// Cloning is cheap; clones share the same document and file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: Arc<PathBuf>,
    document: Arc<RwLock<Document>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> SalesdeskResult<Self> {
        let path = path.as_ref().to_path_buf();

        let document = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Document::default(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| JsonStoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Data file does not exist yet");
                Document::default()
            }
            Err(source) => {
                return Err(JsonStoreError::Read {
                    path: path.clone(),
                    source,
                }
                .into());
            }
        };

        info!(
            departments = document.departments.len(),
            sellers = document.sellers.len(),
            "Data file loaded"
        );

        Ok(Self {
            path: Arc::new(path),
            document: Arc::new(RwLock::new(document)),
        })
    }

    /// Location of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Department repository handle sharing this store.
    pub fn departments(&self) -> JsonDepartmentRepository {
        JsonDepartmentRepository {
            store: self.clone(),
        }
    }

    /// Seller repository handle sharing this store.
    pub fn sellers(&self) -> JsonSellerRepository {
        JsonSellerRepository {
            store: self.clone(),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> SalesdeskResult<R> {
        let document = self
            .document
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(f(&document))
    }

    /// Apply `f` to a copy of the document, write it out, then commit it.
    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Document) -> SalesdeskResult<R>,
    ) -> SalesdeskResult<R> {
        let mut document = self
            .document
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut draft = document.clone();
        let result = f(&mut draft)?;
        self.persist(&draft)?;
        *document = draft;
        Ok(result)
    }

    fn persist(&self, document: &Document) -> Result<(), JsonStoreError> {
        let text = serde_json::to_string_pretty(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| JsonStoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(self.path.as_path(), text).map_err(|source| JsonStoreError::Write {
            path: self.path.to_path_buf(),
            source,
        })?;
        debug!(path = %self.path.display(), "Data file written");
        Ok(())
    }
}

impl From<JsonStoreError> for SalesdeskError {
    fn from(err: JsonStoreError) -> Self {
        ApplicationError::from(err).into()
    }
}

/// Department repository over a [`JsonFileStore`].
#[derive(Debug, Clone)]
pub struct JsonDepartmentRepository {
    store: JsonFileStore,
}

impl SeedTarget for JsonDepartmentRepository {
    fn is_fresh(&self) -> SalesdeskResult<bool> {
        self.store.read(|doc| doc.next_department_id == first_id())
    }
}

impl DepartmentRepository for JsonDepartmentRepository {
    fn insert(&self, department: &Department) -> SalesdeskResult<i32> {
        department.validate()?;

        self.store.mutate(|doc| {
            let id = doc.next_department_id;
            doc.next_department_id += 1;
            doc.departments.push(Department {
                id: Some(id),
                ..department.clone()
            });
            Ok(id)
        })
    }

    fn update(&self, department: &Department) -> SalesdeskResult<()> {
        department.validate()?;

        let id = department.id.unwrap_or_default();
        self.store.mutate(|doc| {
            let row = doc
                .departments
                .iter_mut()
                .find(|d| d.id == Some(id))
                .ok_or(ApplicationError::NotFound {
                    entity: "Department",
                    id,
                })?;
            *row = department.clone();
            Ok(())
        })
    }

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()> {
        self.store.mutate(|doc| {
            let before = doc.departments.len();
            doc.departments.retain(|d| d.id != Some(id));
            if doc.departments.len() == before {
                return Err(ApplicationError::NotFound {
                    entity: "Department",
                    id,
                }
                .into());
            }
            Ok(())
        })
    }

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Department>> {
        self.store.read(|doc| doc.department(id).cloned())
    }

    fn find_all(&self) -> SalesdeskResult<Vec<Department>> {
        self.store.read(|doc| {
            let mut all = doc.departments.clone();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            all
        })
    }
}

/// Seller repository over a [`JsonFileStore`].
///
/// Reads return the seller's department as currently stored.
#[derive(Debug, Clone)]
pub struct JsonSellerRepository {
    store: JsonFileStore,
}

impl JsonSellerRepository {
    fn collect_sorted(&self, keep: impl Fn(&Seller) -> bool) -> SalesdeskResult<Vec<Seller>> {
        self.store.read(|doc| {
            let mut sellers: Vec<_> = doc
                .sellers
                .iter()
                .filter(|s| keep(s))
                .map(|s| doc.resolve(s))
                .collect();
            sellers.sort_by(|a, b| a.name.cmp(&b.name));
            sellers
        })
    }
}

impl SellerRepository for JsonSellerRepository {
    fn insert(&self, seller: &Seller) -> SalesdeskResult<i32> {
        seller.validate()?;

        self.store.mutate(|doc| {
            let id = doc.next_seller_id;
            doc.next_seller_id += 1;
            doc.sellers.push(Seller {
                id: Some(id),
                ..seller.clone()
            });
            Ok(id)
        })
    }

    fn update(&self, seller: &Seller) -> SalesdeskResult<()> {
        seller.validate()?;

        let id = seller.id.unwrap_or_default();
        self.store.mutate(|doc| {
            let row = doc
                .sellers
                .iter_mut()
                .find(|s| s.id == Some(id))
                .ok_or(ApplicationError::NotFound {
                    entity: "Seller",
                    id,
                })?;
            *row = seller.clone();
            Ok(())
        })
    }

    fn delete_by_id(&self, id: i32) -> SalesdeskResult<()> {
        self.store.mutate(|doc| {
            let before = doc.sellers.len();
            doc.sellers.retain(|s| s.id != Some(id));
            if doc.sellers.len() == before {
                return Err(ApplicationError::NotFound { entity: "Seller", id }.into());
            }
            Ok(())
        })
    }

    fn find_by_id(&self, id: i32) -> SalesdeskResult<Option<Seller>> {
        self.store.read(|doc| {
            doc.sellers
                .iter()
                .find(|s| s.id == Some(id))
                .map(|s| doc.resolve(s))
        })
    }

    fn find_all(&self) -> SalesdeskResult<Vec<Seller>> {
        self.collect_sorted(|_| true)
    }

    fn find_by_department(&self, department_id: i32) -> SalesdeskResult<Vec<Seller>> {
        self.collect_sorted(|s| s.department_id() == Some(department_id))
    }
}
