//! corpusdb API Comprehensive Test Suite
//!
//! Tests organized by functionality:
//! - store_ops: record CRUD, validation, batch atomicity
//! - ingestion: encode-and-insert pipeline
//! - search: index build and similarity queries
//! - training: labeled-vector export
//! - staleness: write counter vs built_at
//! - durability: persistence across reopen
//! - concurrency: shared-handle thread safety
//! - scenario: the cat/car/dog end-to-end walkthrough

mod concurrency;
mod durability;
mod ingestion;
mod scenario;
mod search;
mod store_ops;

pub use corpusdb::prelude::*;

/// Ephemeral database with Euclidean distance and the given dimension.
pub fn test_db(dimension: usize) -> Corpus {
    let config = StoreConfig::new(dimension, DistanceMetric::Euclidean).expect("valid config");
    Corpus::ephemeral(config)
}

/// Shorthand for `{"label": <label>}` metadata.
pub fn label(value: &str) -> Value {
    Value::object([("label", value)])
}
