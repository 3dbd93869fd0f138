//! Store configuration: embedding dimension and distance metric.
//!
//! Configuration is passed explicitly at store creation and is immutable
//! afterwards. Nothing in the core reads ambient process state.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Distance metric for similarity ranking.
///
/// All metrics are normalized to "lower = closer"; query results are ordered
/// by ascending distance. Euclidean is the default for the IVF index, which
/// partitions the space around L2 centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// L2 distance: sqrt(sum((a - b)^2))
    #[default]
    Euclidean,

    /// Cosine distance: 1 - dot(a,b) / (||a|| * ||b||)
    /// Zero-norm inputs are treated as maximally distant.
    Cosine,

    /// Negated inner product: -dot(a,b)
    /// Assumes pre-normalized embeddings; unbounded otherwise.
    DotProduct,
}

impl DistanceMetric {
    /// Human-readable name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::DotProduct => "dot_product",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Some(DistanceMetric::Euclidean),
            "cosine" => Some(DistanceMetric::Cosine),
            "dot_product" | "dot" | "inner_product" => Some(DistanceMetric::DotProduct),
            _ => None,
        }
    }

    /// Serialization value for the record-log header.
    pub fn to_byte(&self) -> u8 {
        match self {
            DistanceMetric::Euclidean => 0,
            DistanceMetric::Cosine => 1,
            DistanceMetric::DotProduct => 2,
        }
    }

    /// Deserialization from the record-log header.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(DistanceMetric::Euclidean),
            1 => Some(DistanceMetric::Cosine),
            2 => Some(DistanceMetric::DotProduct),
            _ => None,
        }
    }

    /// Compute the distance between two equal-length vectors.
    ///
    /// Callers are responsible for validating lengths; mismatched slices are
    /// compared over the shorter prefix by `zip`.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::Euclidean => {
                let sum: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
                sum.sqrt()
            }
            DistanceMetric::Cosine => {
                let mut dot = 0.0;
                let mut norm_a = 0.0;
                let mut norm_b = 0.0;
                for (x, y) in a.iter().zip(b.iter()) {
                    dot += x * y;
                    norm_a += x * x;
                    norm_b += y * y;
                }
                if norm_a <= 0.0 || norm_b <= 0.0 {
                    return 1.0;
                }
                1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
            }
            DistanceMetric::DotProduct => {
                let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
                -dot
            }
        }
    }
}

/// Store configuration - immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Embedding dimension (e.g. 384, 768, 1536). Must be > 0.
    pub dimension: usize,

    /// Distance metric for similarity ranking.
    pub metric: DistanceMetric,
}

impl StoreConfig {
    /// Create a new StoreConfig with validation.
    ///
    /// Returns `InvalidParameter` if dimension is 0.
    pub fn new(dimension: usize, metric: DistanceMetric) -> Result<Self, Error> {
        if dimension == 0 {
            return Err(Error::InvalidParameter(format!(
                "invalid dimension: {} (must be > 0)",
                dimension
            )));
        }
        Ok(StoreConfig { dimension, metric })
    }

    /// Config for all-MiniLM-L6-v2 (384 dims).
    pub fn for_minilm() -> Self {
        StoreConfig {
            dimension: 384,
            metric: DistanceMetric::Euclidean,
        }
    }

    /// Config for sentence-transformers/all-mpnet-base-v2 (768 dims).
    pub fn for_mpnet() -> Self {
        StoreConfig {
            dimension: 768,
            metric: DistanceMetric::Euclidean,
        }
    }

    /// Config for OpenAI text-embedding-ada-002 (1536 dims).
    pub fn for_openai_ada() -> Self {
        StoreConfig {
            dimension: 1536,
            metric: DistanceMetric::Euclidean,
        }
    }

    /// One-line description for error messages.
    pub fn describe(&self) -> String {
        format!("dimension={} metric={}", self.dimension, self.metric.name())
    }
}
