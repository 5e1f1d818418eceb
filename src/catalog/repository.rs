//! The catalog store: `products` and `categories` plus the domain operations.
//!
//! Writes take `&mut self`, so the duplicate-name check in `create_product`
//! and the insert that follows cannot interleave with another write on the
//! same store. Threaded callers share a store through
//! [`crate::catalog::SharedCatalog`], which keeps that guarantee.

use crate::catalog::identity::CollectionName;
use crate::catalog::model::{Category, GENERATED_FIELD, Generated, Product, Record};
use crate::collection::Collection;
use crate::error::{CatalogError, StorageError};
use crate::journal::Journal;
use crate::query::Filter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug)]
pub struct CatalogStore {
    journal: Journal,
    products: Collection<Product>,
    categories: Collection<Category>,
}

impl CatalogStore {
    /// Open the journal at `path`, replaying every stored record.
    ///
    /// A missing file opens an empty store; the file is created by the first
    /// insert.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::from_journal(Journal::at(path))
    }

    /// A store that keeps nothing on disk.
    pub fn in_memory() -> Self {
        let journal = Journal::in_memory();
        Self {
            products: Collection::with_records(journal.clone(), Vec::new()),
            categories: Collection::with_records(journal.clone(), Vec::new()),
            journal,
        }
    }

    fn from_journal(journal: Journal) -> Result<Self, StorageError> {
        let mut products: Vec<Product> = Vec::new();
        let mut categories: Vec<Category> = Vec::new();
        for entry in journal.load()? {
            let collection = entry.collection.clone();
            match collection {
                CollectionName::Products => products.push(journal.decode(entry)?),
                CollectionName::Categories => categories.push(journal.decode(entry)?),
                CollectionName::Other(name) => {
                    warn!(
                        collection = %name,
                        line = entry.line,
                        "ignoring journal entry for unknown collection"
                    );
                }
            }
        }
        info!(
            journal = ?journal.path(),
            products = products.len(),
            categories = categories.len(),
            "opened catalog journal"
        );
        Ok(Self {
            products: Collection::with_records(journal.clone(), products),
            categories: Collection::with_records(journal.clone(), categories),
            journal,
        })
    }

    pub fn journal_path(&self) -> Option<&Path> {
        self.journal.path()
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    pub fn categories(&self) -> &Collection<Category> {
        &self.categories
    }

    pub(crate) fn products_mut(&mut self) -> &mut Collection<Product> {
        &mut self.products
    }

    pub(crate) fn categories_mut(&mut self) -> &mut Collection<Category> {
        &mut self.categories
    }

    /// Products whose name contains `name_filter` (case-insensitive), or all
    /// products when the filter is absent or empty. Each is stamped at render
    /// time.
    pub fn list_products(&self, name_filter: Option<&str>) -> Vec<Generated<Product>> {
        let filter = name_filter
            .filter(|q| !q.is_empty())
            .map(Filter::name_contains);
        render(&self.products, filter.as_ref())
    }

    /// Categories whose id appears in the comma-separated `ids_filter`, or all
    /// categories when no filter is given. An empty list matches nothing.
    pub fn list_categories(&self, ids_filter: Option<&str>) -> Vec<Generated<Category>> {
        let filter = ids_filter.map(Filter::id_in_list);
        render(&self.categories, filter.as_ref())
    }

    /// Insert `candidate` unless a product with the same name already exists.
    ///
    /// A candidate without a name never collides. Any `generated` key the
    /// caller sent is dropped before the record is stored.
    pub fn create_product(
        &mut self,
        mut candidate: Product,
    ) -> Result<Generated<Product>, CatalogError> {
        candidate.extra.remove(GENERATED_FIELD);
        if let Some(name) = candidate.name() {
            if !self
                .products
                .matching(&Filter::equals("name", name))
                .is_empty()
            {
                return Err(CatalogError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }
        self.products.insert(candidate.clone())?;
        info!(
            name = candidate.name().unwrap_or_default(),
            id = candidate.id().map(|id| id.as_str()).unwrap_or_default(),
            "created product"
        );
        Ok(Generated::now(candidate))
    }
}

fn render<R: Record>(collection: &Collection<R>, filter: Option<&Filter>) -> Vec<Generated<R>> {
    match filter {
        Some(filter) => collection
            .matching(filter)
            .into_iter()
            .cloned()
            .map(Generated::now)
            .collect(),
        None => collection.all().iter().cloned().map(Generated::now).collect(),
    }
}
