//! Ingestion operations.

use crate::primitives::shared::Shared;
use corpus_core::{RecordId, Result};
use corpus_ingest::{RawItem, TextEncoder};
use std::sync::Arc;

/// Ingestion pipeline: encode raw items and store them atomically.
///
/// Access via `db.ingest`.
pub struct Ingest {
    shared: Arc<Shared>,
}

impl Ingest {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Ingest { shared }
    }

    /// Encode a batch of `(text, label)` items and insert the records.
    ///
    /// The encoder's dimension is checked against the store before any
    /// encoding happens, and the insert is atomic: an encoder failure or a
    /// validation failure persists nothing. Labels become `metadata.label`.
    ///
    /// A successful ingest advances the store's write counter, which makes
    /// any previously built index report stale.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the encoder disagrees with the store
    /// - `BatchItem` (wrapping `ValidationError`) on an empty text
    /// - `EncodingError` with the offending position on encoder failure
    pub fn batch(&self, encoder: &dyn TextEncoder, items: &[RawItem]) -> Result<Vec<RecordId>> {
        corpus_ingest::ingest_batch(&self.shared.store, encoder, items)
    }
}
