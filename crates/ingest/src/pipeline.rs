//! The ingestion pipeline.

use crate::encoder::TextEncoder;
use corpus_core::{Error, NewRecord, RecordId, Result, Value};
use corpus_store::RecordStore;
use tracing::{debug, info};

/// A raw ingestion item: text plus an optional training label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem {
    /// Text to encode and store
    pub text: String,
    /// Optional label, stored as `metadata.label`
    pub label: Option<String>,
}

impl RawItem {
    /// An unlabeled item.
    pub fn new(text: impl Into<String>) -> Self {
        RawItem {
            text: text.into(),
            label: None,
        }
    }

    /// A labeled item.
    pub fn labeled(text: impl Into<String>, label: impl Into<String>) -> Self {
        RawItem {
            text: text.into(),
            label: Some(label.into()),
        }
    }
}

/// Encode a batch of items and insert the resulting records atomically.
///
/// Order of checks, all before any mutation:
///
/// 1. the encoder's dimension must equal the store's (`DimensionMismatch`,
///    raised before a single encode call);
/// 2. every text must be non-empty (`BatchItem` wrapping `ValidationError`,
///    raised before a single encode call);
/// 3. the whole batch is encoded; an encoder failure aborts with
///    `EncodingError` carrying the offending item's position.
///
/// Items with a label get `{"label": <label>}` metadata; unlabeled items get
/// none. On success the returned ids are in item order and the store's write
/// counter has advanced by exactly one, which flags any previously built
/// index as stale.
pub fn ingest_batch(
    store: &RecordStore,
    encoder: &dyn TextEncoder,
    items: &[RawItem],
) -> Result<Vec<RecordId>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    if encoder.dimension() != store.dimension() {
        return Err(Error::DimensionMismatch {
            expected: store.dimension(),
            got: encoder.dimension(),
        });
    }

    for (index, item) in items.iter().enumerate() {
        if item.text.is_empty() {
            return Err(
                Error::ValidationError("text must not be empty".into()).at_batch_index(index)
            );
        }
    }

    let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
    debug!(items = items.len(), "encoding ingest batch");
    let embeddings = encoder
        .encode_batch(&texts)
        .map_err(|e| Error::EncodingError {
            position: e.position,
            reason: e.reason,
        })?;

    let records: Vec<NewRecord> = items
        .iter()
        .zip(embeddings)
        .map(|(item, embedding)| match &item.label {
            Some(label) => NewRecord::with_metadata(
                item.text.clone(),
                Value::object([("label", label.as_str())]),
                embedding,
            ),
            None => NewRecord::new(item.text.clone(), embedding),
        })
        .collect();

    let ids = store.insert_batch(records)?;
    info!(
        records = ids.len(),
        write_version = store.write_version(),
        "ingested batch"
    );
    Ok(ids)
}
