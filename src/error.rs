//! Error taxonomy for the catalog store.
//!
//! `StorageError` covers the journal (open, replay, append); it is fatal to the
//! call that hit it and never retried here. `CatalogError` adds the one
//! recoverable domain failure, a declined product write.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the backing journal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("journal I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("journal {path} line {line}: unable to parse entry ({source})")]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced by catalog write operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product '{name}' already exists")]
    DuplicateName { name: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, CatalogError::DuplicateName { .. })
    }
}
