//! Append-only document collection backed by the store journal.

use crate::catalog::identity::CollectionName;
use crate::catalog::model::Record;
use crate::error::StorageError;
use crate::journal::Journal;
use crate::query::Filter;
use tracing::debug;

#[derive(Debug, Clone)]
/// Ordered records of one type, in insertion order.
///
/// Reads never touch the disk: the journal is replayed into `records` when the
/// owning store opens. Inserts go to the journal first so a failed write leaves
/// the in-memory view unchanged.
pub struct Collection<R> {
    name: CollectionName,
    records: Vec<R>,
    journal: Journal,
}

impl<R: Record> Collection<R> {
    pub(crate) fn with_records(journal: Journal, records: Vec<R>) -> Self {
        Self {
            name: R::collection(),
            records,
            journal,
        }
    }

    pub fn name(&self) -> &CollectionName {
        &self.name
    }

    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records for which `predicate` holds, in storage order.
    pub fn search<P>(&self, predicate: P) -> Vec<&R>
    where
        P: Fn(&R) -> bool,
    {
        self.records.iter().filter(|record| predicate(*record)).collect()
    }

    pub fn matching(&self, filter: &Filter) -> Vec<&R> {
        let hits = self.search(|record| filter.matches(record));
        debug!(
            collection = %self.name,
            matched = hits.len(),
            total = self.records.len(),
            "evaluated filter"
        );
        hits
    }

    /// Durably append `record`. No validation is applied.
    pub fn insert(&mut self, record: R) -> Result<(), StorageError> {
        self.journal.append(&self.name, &record)?;
        self.records.push(record);
        Ok(())
    }
}
