//! Catalog store for products and categories.
//!
//! The crate keeps two typed document collections (`products`, `categories`)
//! in memory, persisted to an append-only NDJSON journal. Reads are filtered
//! with [`Filter`] values; product writes are de-duplicated by name. The
//! [`api`] module maps the catalog call contracts (`GET /products`,
//! `POST /products`, `GET /categories`, health) onto the store without owning
//! a socket, and the `catalog` binary drives it from the command line.

pub mod api;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod journal;
pub mod query;
pub mod seed;

pub use api::{Method, Response, ResponseBody, dispatch};
pub use catalog::{
    CatalogStore, Category, CollectionName, GENERATED_FIELD, Generated, Product, Record,
    RecordId, SharedCatalog,
};
pub use collection::Collection;
pub use config::StoreConfig;
pub use error::{CatalogError, StorageError};
pub use journal::{Journal, JournalEntry, read_entries};
pub use query::{Filter, split_id_list};
pub use seed::{SeedReport, default_categories, default_products, seed_defaults};
