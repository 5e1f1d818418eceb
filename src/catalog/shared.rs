//! Thread-safe handle over a [`CatalogStore`].
//!
//! Every operation holds the store lock for its full duration, so a
//! `create_product` check and its insert are never split by another writer.

use crate::catalog::model::{Category, Generated, Product};
use crate::catalog::repository::CatalogStore;
use crate::error::{CatalogError, StorageError};
use crate::seed::{SeedReport, seed_defaults};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub struct SharedCatalog {
    inner: Arc<Mutex<CatalogStore>>,
}

impl SharedCatalog {
    pub fn new(store: CatalogStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // Inserts reach the journal before memory, so a panic mid-operation
    // cannot leave the store half-written and the poison flag can be ignored.
    fn lock(&self) -> MutexGuard<'_, CatalogStore> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    pub fn list_products(&self, name_filter: Option<&str>) -> Vec<Generated<Product>> {
        self.lock().list_products(name_filter)
    }

    pub fn list_categories(&self, ids_filter: Option<&str>) -> Vec<Generated<Category>> {
        self.lock().list_categories(ids_filter)
    }

    pub fn create_product(&self, candidate: Product) -> Result<Generated<Product>, CatalogError> {
        self.lock().create_product(candidate)
    }

    pub fn seed_defaults(&self) -> Result<SeedReport, StorageError> {
        let mut store = self.lock();
        seed_defaults(&mut *store)
    }

    /// Run `f` with read access to the underlying store.
    pub fn read<T>(&self, f: impl FnOnce(&CatalogStore) -> T) -> T {
        let store = self.lock();
        f(&*store)
    }
}
