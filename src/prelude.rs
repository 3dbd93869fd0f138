//! Convenient imports for corpusdb.
//!
//! ```ignore
//! use corpusdb::prelude::*;
//!
//! let db = Corpus::ephemeral(StoreConfig::for_minilm());
//! ```

// Main entry point
pub use crate::database::{Corpus, CorpusBuilder};

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::{DistanceMetric, MetadataFilter, NewRecord, RecordId, StoreConfig, Value, VectorRecord};

// Index surface
pub use crate::{CancelToken, IndexInfo, IvfParams, SearchMatch};

// Ingestion surface
pub use crate::{HashingEncoder, LabeledVector, RawItem, TextEncoder};

// Re-export serde_json's json! for building metadata via Value::from_json
pub use serde_json::json;
