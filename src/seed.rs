//! Default dataset inserted on startup.
//!
//! Seeding is keyed on `name` only: an existing record with a default's name
//! is left alone even when its id or category differs, so running the seeder
//! on every start never duplicates or rewrites anything.

use crate::catalog::model::{Category, Product, Record};
use crate::catalog::repository::CatalogStore;
use crate::collection::Collection;
use crate::error::StorageError;
use crate::query::Filter;
use serde::Serialize;
use tracing::info;

pub const VEGETABLES_ID: &str = "f4f986a3-748b-4636-8128-91a92fa4988a";
pub const FRUITS_ID: &str = "d899d6f8-7e17-4bd1-8523-37855f5561a2";

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[("Vegetables", VEGETABLES_ID), ("Fruits", FRUITS_ID)];

// (name, id, category_id)
const DEFAULT_PRODUCTS: &[(&str, &str, &str)] = &[
    ("Tomato", "160d4671-d47b-42ef-82f3-9028fed9394a", VEGETABLES_ID),
    ("Potato", "3a2f59ed-1107-4f34-9474-c8a8cab1161d", VEGETABLES_ID),
    ("Apple", "a9768857-f210-4b23-9c66-967930a22645", FRUITS_ID),
    ("Banana", "75f1ac84-6708-4db6-9a7a-b7d3db3062fb", FRUITS_ID),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, id)| Category::new(*name, *id))
        .collect()
}

pub fn default_products() -> Vec<Product> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|(name, id, category_id)| Product::new(*name, *id, *category_id))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// How many defaults each seeding pass inserted or found already present.
pub struct SeedReport {
    pub categories_inserted: usize,
    pub categories_skipped: usize,
    pub products_inserted: usize,
    pub products_skipped: usize,
}

impl SeedReport {
    pub fn inserted(&self) -> usize {
        self.categories_inserted + self.products_inserted
    }
}

/// Insert every default category and product whose name is not yet stored.
pub fn seed_defaults(store: &mut CatalogStore) -> Result<SeedReport, StorageError> {
    let mut report = SeedReport::default();
    (report.categories_inserted, report.categories_skipped) =
        seed_missing(store.categories_mut(), default_categories())?;
    (report.products_inserted, report.products_skipped) =
        seed_missing(store.products_mut(), default_products())?;
    Ok(report)
}

fn seed_missing<R: Record>(
    collection: &mut Collection<R>,
    defaults: Vec<R>,
) -> Result<(usize, usize), StorageError> {
    let mut inserted = 0;
    let mut skipped = 0;
    for record in defaults {
        let name = record.name().unwrap_or_default().to_string();
        if !collection.matching(&Filter::equals("name", &name)).is_empty() {
            skipped += 1;
            continue;
        }
        collection.insert(record)?;
        info!(collection = %collection.name(), name = %name, "seeded default record");
        inserted += 1;
    }
    Ok((inserted, skipped))
}
