//! Point-in-time store snapshots.

use corpus_core::{StoreConfig, VectorRecord};

/// A consistent copy of the store's contents.
///
/// Snapshots are taken under the reader lock, so they never contain a
/// partially applied batch, and `write_version` is the store's counter at
/// the moment the snapshot was taken. Index builds run against snapshots so
/// they can proceed concurrently with writes; a build's `built_at` marker is
/// this snapshot's `write_version`.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub(crate) records: Vec<VectorRecord>,
    pub(crate) write_version: u64,
    pub(crate) config: StoreConfig,
}

impl StoreSnapshot {
    /// Records in ascending id order.
    pub fn records(&self) -> &[VectorRecord] {
        &self.records
    }

    /// The store's write counter at snapshot time.
    pub fn write_version(&self) -> u64 {
        self.write_version
    }

    /// Configuration of the snapshotted store.
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
