//! Lazy, restartable record scans.

use crate::store::RecordStore;
use corpus_core::{MetadataFilter, RecordId, VectorRecord};
use std::collections::VecDeque;

/// Records fetched per lock acquisition.
const SCAN_CHUNK: usize = 256;

/// A lazy scan over the store in ascending id order.
///
/// The scan is bounded to records that existed when it was created, so it is
/// finite even under concurrent writes. It holds no lock between chunks;
/// each refill takes the reader lock briefly. Every call to
/// [`RecordStore::scan`] produces an independent fresh scan.
pub struct Scan<'a> {
    store: &'a RecordStore,
    filter: Option<MetadataFilter>,
    /// Next id to examine.
    cursor: u64,
    /// Exclusive upper bound captured at scan creation.
    bound: u64,
    buffer: VecDeque<VectorRecord>,
    done: bool,
}

impl<'a> Scan<'a> {
    pub(crate) fn new(store: &'a RecordStore, filter: Option<MetadataFilter>) -> Self {
        let bound = store.table().read().next_id;
        Scan {
            store,
            filter,
            cursor: 0,
            bound,
            buffer: VecDeque::new(),
            done: bound == 0,
        }
    }

    fn refill(&mut self) {
        let table = self.store.table().read();
        let range = table
            .records
            .range(RecordId::new(self.cursor)..RecordId::new(self.bound));

        let mut examined_all = true;
        for (id, record) in range {
            self.cursor = id.as_u64() + 1;
            let matches = match &self.filter {
                Some(filter) => filter.matches(record.metadata.as_ref()),
                None => true,
            };
            if matches {
                self.buffer.push_back(record.clone());
                if self.buffer.len() >= SCAN_CHUNK {
                    examined_all = false;
                    break;
                }
            }
        }

        if examined_all {
            self.done = true;
        }
    }
}

impl Iterator for Scan<'_> {
    type Item = VectorRecord;

    fn next(&mut self) -> Option<VectorRecord> {
        if self.buffer.is_empty() && !self.done {
            self.refill();
        }
        self.buffer.pop_front()
    }
}
