//! API result types for the corpusdb facade.

use corpus_core::{DistanceMetric, RecordId, Value};

/// Partitions probed by [`search`](crate::primitives::Index::search) when no
/// explicit probe count is given. One probe is the fastest, lowest-recall
/// setting; use [`query`](crate::primitives::Index::query) to trade latency
/// for recall.
pub const DEFAULT_PROBE_COUNT: usize = 1;

/// One similarity-search result, hydrated from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    /// Id of the matched record
    pub id: RecordId,
    /// Exact distance to the query (lower = closer)
    pub distance: f32,
    /// The record's text payload
    pub text: String,
    /// The record's metadata, if any
    pub metadata: Option<Value>,
}

/// Description of the currently live index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexInfo {
    /// Number of partitions
    pub num_partitions: usize,
    /// Seed the clustering pass ran with (recorded even when drawn randomly)
    pub seed: u64,
    /// Store write counter at build-snapshot time
    pub built_at: u64,
    /// Embedding dimension the index was built for
    pub dimension: usize,
    /// Distance metric the index was built with
    pub metric: DistanceMetric,
    /// Number of records covered by the index
    pub indexed_records: usize,
}

/// A labeled embedding, as exported for classifier training.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledVector {
    /// Id of the source record
    pub id: RecordId,
    /// The record's embedding
    pub embedding: Vec<f32>,
    /// The label, rendered to text
    pub label: String,
}
