//! Record types for the vector record store.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Surrogate key for a stored record.
///
/// Ids are assigned by the store, strictly increasing, and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Create a RecordId from a raw value.
    pub fn new(id: u64) -> Self {
        RecordId(id)
    }

    /// Get the underlying u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A record as stored: id, text payload, optional metadata, embedding.
///
/// `text` and `embedding` are immutable after insertion; there is no update
/// path. The embedding length always equals the store's configured dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Store-assigned surrogate key
    pub id: RecordId,
    /// Raw text the embedding was computed from
    pub text: String,
    /// Optional structured metadata (e.g. a `label` field)
    pub metadata: Option<Value>,
    /// Fixed-dimension embedding
    pub embedding: Vec<f32>,
}

impl VectorRecord {
    /// Get the embedding dimension.
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }

    /// Look up a top-level metadata field.
    pub fn metadata_field(&self, field: &str) -> Option<&Value> {
        self.metadata
            .as_ref()
            .and_then(|m| m.as_object())
            .and_then(|obj| obj.get(field))
    }
}

/// A record as submitted for insertion, before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    /// Raw text payload (must be non-empty)
    pub text: String,
    /// Optional structured metadata
    pub metadata: Option<Value>,
    /// Embedding (length must equal the store dimension)
    pub embedding: Vec<f32>,
}

impl NewRecord {
    /// Create a record with no metadata.
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        NewRecord {
            text: text.into(),
            metadata: None,
            embedding,
        }
    }

    /// Create a record with metadata.
    pub fn with_metadata(text: impl Into<String>, metadata: Value, embedding: Vec<f32>) -> Self {
        NewRecord {
            text: text.into(),
            metadata: Some(metadata),
            embedding,
        }
    }
}
