//! Record storage operations.

use crate::primitives::shared::Shared;
use corpus_core::{MetadataFilter, NewRecord, RecordId, Result, StoreConfig, VectorRecord};
use corpus_store::{Scan, StoreSnapshot};
use std::sync::Arc;

/// Record operations: insert, get, scan.
///
/// Access via `db.records`.
pub struct Records {
    shared: Arc<Shared>,
}

impl Records {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Records { shared }
    }

    /// Insert a single record, returning its assigned id.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if the text is empty
    /// - `DimensionMismatch` if the embedding length is wrong
    pub fn insert(&self, record: NewRecord) -> Result<RecordId> {
        self.shared.store.insert(record)
    }

    /// Insert a batch atomically.
    ///
    /// If any record fails validation, nothing is persisted and the error
    /// reports the failing index.
    pub fn insert_batch(&self, records: Vec<NewRecord>) -> Result<Vec<RecordId>> {
        self.shared.store.insert_batch(records)
    }

    /// Fetch a record by id, or `NotFound`.
    pub fn get(&self, id: RecordId) -> Result<VectorRecord> {
        self.shared.store.get(id)
    }

    /// Check whether a record exists.
    pub fn contains(&self, id: RecordId) -> bool {
        self.shared.store.contains(id)
    }

    /// Lazily scan records in ascending id order, optionally filtered by
    /// metadata. Each call yields an independent fresh scan.
    pub fn scan(&self, filter: Option<MetadataFilter>) -> Scan<'_> {
        self.shared.store.scan(filter)
    }

    /// Take a consistent snapshot of the store.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.shared.store.snapshot()
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.shared.store.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.shared.store.is_empty()
    }

    /// The store's monotonic write counter.
    pub fn write_version(&self) -> u64 {
        self.shared.store.write_version()
    }

    /// The store's immutable configuration.
    pub fn config(&self) -> StoreConfig {
        self.shared.store.config()
    }

    /// The configured embedding dimension.
    pub fn dimension(&self) -> usize {
        self.shared.store.dimension()
    }
}
