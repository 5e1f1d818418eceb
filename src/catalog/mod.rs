//! Catalog records and the store that holds them.
//!
//! `model` defines the typed `Product`/`Category` records, `identity` the
//! string identifiers, `repository` the `CatalogStore` with its list/create
//! operations, and `shared` the lock-guarded handle handed to request code.

pub mod identity;
pub mod model;
pub mod repository;
pub mod shared;

pub use identity::{CollectionName, RecordId};
pub use model::{Category, GENERATED_FIELD, Generated, Product, Record};
pub use repository::CatalogStore;
pub use shared::SharedCatalog;
