//! Store configuration resolved from CLI overrides and the environment.
//!
//! Resolution order: an explicit override, then `CATALOG_STORE_PATH`, then
//! `db.ndjson` in the working directory. Lookups go through a caller-supplied
//! function so tests can resolve against a fixed map instead of the process
//! environment.

use crate::catalog::{CatalogStore, SharedCatalog};
use crate::error::StorageError;
use crate::seed::seed_defaults;
use std::env;
use std::path::PathBuf;
use tracing::info;

pub const STORE_PATH_ENV: &str = "CATALOG_STORE_PATH";
pub const SKIP_SEED_ENV: &str = "CATALOG_SKIP_SEED";
pub const DEFAULT_STORE_FILE: &str = "db.ndjson";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub store_path: PathBuf,
    pub seed_on_open: bool,
}

impl StoreConfig {
    /// Resolve against the process environment.
    pub fn from_env(store_override: Option<PathBuf>) -> Self {
        Self::resolve(store_override, |key| env::var(key).ok())
    }

    pub fn resolve<F>(store_override: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_path = store_override
            .or_else(|| {
                lookup(STORE_PATH_ENV)
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
        let seed_on_open = !lookup(SKIP_SEED_ENV)
            .map(|v| flag_enabled(&v))
            .unwrap_or(false);
        Self {
            store_path,
            seed_on_open,
        }
    }

    /// Open the configured store, seed it unless disabled, and wrap it for
    /// sharing with request handlers.
    pub fn open(&self) -> Result<SharedCatalog, StorageError> {
        let mut store = CatalogStore::open(&self.store_path)?;
        if self.seed_on_open {
            let report = seed_defaults(&mut store)?;
            info!(
                inserted = report.inserted(),
                "seeded default catalog entries"
            );
        }
        Ok(SharedCatalog::new(store))
    }
}

/// Non-empty values other than `0` switch a flag on.
fn flag_enabled(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0"
}
