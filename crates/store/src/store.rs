//! RecordStore: the vector record store primitive.
//!
//! ## Concurrency
//!
//! Writers serialize on a commit mutex that owns id assignment and the
//! record log; the in-memory table sits behind an `RwLock` shared with
//! readers. A committed batch is applied to the table in one short write
//! section, so readers observe batches all-or-nothing. Log-before-table
//! ordering makes the same guarantee hold across a crash.
//!
//! ## Write counter
//!
//! `write_version` increments once per committed writeset (insert or batch).
//! After recovery it equals the number of committed frames in the log, so
//! staleness comparisons against a previously persisted index artifact stay
//! valid across restarts.

use crate::log::{LogReplay, RecordLog};
use crate::scan::Scan;
use crate::snapshot::StoreSnapshot;
use corpus_core::{Error, MetadataFilter, NewRecord, RecordId, Result, StoreConfig, VectorRecord};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// File name of the record log within a store directory.
pub(crate) const RECORD_LOG_FILE: &str = "records.log";

/// The in-memory table, shared between readers and the committer.
pub(crate) struct Table {
    pub(crate) records: BTreeMap<RecordId, VectorRecord>,
    pub(crate) write_version: u64,
    /// Upper bound for scans: the next id that would be assigned.
    pub(crate) next_id: u64,
}

/// Writer-side state: id allocation and the durable log. Owning both under
/// one mutex serializes the assign-append-apply critical section.
struct Committer {
    next_id: u64,
    log: Option<RecordLog>,
}

/// Durable, dimension-consistent storage of vector records.
///
/// # Example
///
/// ```
/// use corpus_core::{NewRecord, StoreConfig, DistanceMetric};
/// use corpus_store::RecordStore;
///
/// # fn main() -> corpus_core::Result<()> {
/// let config = StoreConfig::new(3, DistanceMetric::Euclidean)?;
/// let store = RecordStore::ephemeral(config);
/// let id = store.insert(NewRecord::new("cat", vec![1.0, 0.0, 0.0]))?;
/// assert_eq!(store.get(id)?.text, "cat");
/// # Ok(())
/// # }
/// ```
pub struct RecordStore {
    config: StoreConfig,
    table: RwLock<Table>,
    committer: Mutex<Committer>,
}

impl RecordStore {
    /// Open a store at `dir`, creating it if absent.
    ///
    /// Idempotent: reopening with the same configuration replays the record
    /// log and is otherwise a no-op; a differing dimension or metric fails
    /// with `SchemaConflict` and changes nothing on disk.
    pub fn open(dir: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let LogReplay {
            log,
            records,
            frames,
        } = RecordLog::open(&dir.join(RECORD_LOG_FILE), config)?;

        let next_id = records.last().map(|r| r.id.as_u64() + 1).unwrap_or(0);
        let table = records.into_iter().map(|r| (r.id, r)).collect::<BTreeMap<_, _>>();
        info!(
            dir = %dir.display(),
            records = table.len(),
            write_version = frames,
            "opened record store"
        );

        Ok(RecordStore {
            config,
            table: RwLock::new(Table {
                records: table,
                write_version: frames,
                next_id,
            }),
            committer: Mutex::new(Committer {
                next_id,
                log: Some(log),
            }),
        })
    }

    /// Create a store with no disk backing.
    ///
    /// All data is lost on drop. Useful for tests and ephemeral pipelines.
    pub fn ephemeral(config: StoreConfig) -> Self {
        RecordStore {
            config,
            table: RwLock::new(Table {
                records: BTreeMap::new(),
                write_version: 0,
                next_id: 0,
            }),
            committer: Mutex::new(Committer {
                next_id: 0,
                log: None,
            }),
        }
    }

    /// The store's immutable configuration.
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// The configured embedding dimension.
    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.table.read().records.len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.table.read().records.is_empty()
    }

    /// Monotonic write counter; bumps once per committed insert or batch.
    pub fn write_version(&self) -> u64 {
        self.table.read().write_version
    }

    /// Insert a single record, returning its assigned id.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if `text` is empty
    /// - `DimensionMismatch` if the embedding length differs from the
    ///   store dimension
    ///
    /// Validation happens before any mutation; a failed insert leaves the
    /// store unchanged.
    pub fn insert(&self, record: NewRecord) -> Result<RecordId> {
        self.validate(&record)?;
        let ids = self.commit(vec![record])?;
        Ok(ids[0])
    }

    /// Insert a batch atomically.
    ///
    /// Every record is validated before anything is persisted. On failure
    /// the error reports the index of the offending record via
    /// `Error::BatchItem` and zero records are stored. An empty batch is a
    /// no-op that does not bump the write counter.
    pub fn insert_batch(&self, records: Vec<NewRecord>) -> Result<Vec<RecordId>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }
        for (index, record) in records.iter().enumerate() {
            self.validate(record).map_err(|e| e.at_batch_index(index))?;
        }
        self.commit(records)
    }

    /// Fetch a record by id.
    pub fn get(&self, id: RecordId) -> Result<VectorRecord> {
        self.table
            .read()
            .records
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    /// Check whether a record exists.
    pub fn contains(&self, id: RecordId) -> bool {
        self.table.read().records.contains_key(&id)
    }

    /// Lazily scan records in ascending id order.
    ///
    /// Each call yields an independent fresh scan bounded to the records
    /// present when the scan was created. The iterator re-acquires the
    /// reader lock per chunk, so it never starves writers; batch atomicity
    /// guarantees it also never observes half a batch.
    pub fn scan(&self, filter: Option<MetadataFilter>) -> Scan<'_> {
        Scan::new(self, filter)
    }

    /// Take a consistent snapshot of all records plus the write counter at
    /// the moment the snapshot was taken.
    pub fn snapshot(&self) -> StoreSnapshot {
        let table = self.table.read();
        StoreSnapshot {
            records: table.records.values().cloned().collect(),
            write_version: table.write_version,
            config: self.config,
        }
    }

    pub(crate) fn table(&self) -> &RwLock<Table> {
        &self.table
    }

    fn validate(&self, record: &NewRecord) -> Result<()> {
        if record.text.is_empty() {
            return Err(Error::ValidationError("text must not be empty".into()));
        }
        if record.embedding.len() != self.config.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.config.dimension,
                got: record.embedding.len(),
            });
        }
        Ok(())
    }

    /// Assign ids, make the writeset durable, then publish it to readers.
    ///
    /// The committer mutex serializes writers end to end; the table write
    /// lock is held only for the in-memory application.
    fn commit(&self, records: Vec<NewRecord>) -> Result<Vec<RecordId>> {
        let mut committer = self.committer.lock();

        let mut assigned = Vec::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let id = RecordId::new(committer.next_id + ids.len() as u64);
            ids.push(id);
            assigned.push(VectorRecord {
                id,
                text: record.text,
                metadata: record.metadata,
                embedding: record.embedding,
            });
        }

        // Durability point. If the append fails, ids were never published
        // and the in-memory table is untouched.
        if let Some(log) = committer.log.as_mut() {
            log.append(&assigned)?;
        }
        committer.next_id += assigned.len() as u64;

        let mut table = self.table.write();
        for record in assigned {
            table.records.insert(record.id, record);
        }
        table.write_version += 1;
        table.next_id = committer.next_id;
        debug!(
            records = ids.len(),
            write_version = table.write_version,
            "committed writeset"
        );

        Ok(ids)
    }
}
