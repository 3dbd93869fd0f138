//! # corpusdb
//!
//! Embedded vector record store with a rebuildable IVF similarity index.
//!
//! corpusdb stores fixed-dimension embeddings alongside their source text
//! and structured metadata, maintains an explicitly rebuilt approximate
//! nearest-neighbor index over them, and exposes the stored vectors to
//! downstream consumers such as classifier training.
//!
//! ## Quick Start
//!
//! ```ignore
//! use corpusdb::prelude::*;
//!
//! // Open a store (384-dim embeddings, Euclidean distance)
//! let db = Corpus::builder()
//!     .path("./my-corpus")
//!     .config(StoreConfig::for_minilm())
//!     .open()?;
//!
//! // Ingest labeled text through an encoder
//! let encoder = HashingEncoder::new(384)?;
//! db.ingest.batch(&encoder, &[
//!     RawItem::labeled("a small gray cat", "animal"),
//!     RawItem::labeled("a fast red car", "vehicle"),
//! ])?;
//!
//! // Build the index, then search
//! db.index.build(IvfParams::new(2))?;
//! let hits = db.index.search(&encoder.encode("gray cat")?, 1)?;
//!
//! // Export labeled vectors for training
//! let training_set = db.training.fetch_labeled();
//! ```
//!
//! ## Staleness is explicit
//!
//! The index reflects the store as of its build; later inserts are invisible
//! to it until the next [`Index::build`](primitives::Index::build). Compare
//! [`Index::is_stale`](primitives::Index::is_stale) or `built_at` against
//! the store's write counter - the index never refreshes behind your back.

#![warn(missing_docs)]

mod database;
mod types;

pub mod prelude;
pub mod primitives;

// Re-export main entry points
pub use database::{Corpus, CorpusBuilder};

// Re-export the error taxonomy (defined in corpus-core, shared verbatim)
pub use corpus_core::{Error, Result};

// Re-export core vocabulary
pub use corpus_core::{
    DistanceMetric, MetadataFilter, NewRecord, RecordId, StoreConfig, Value, VectorRecord,
};

// Re-export index and ingest surfaces
pub use corpus_index::{CancelToken, IvfParams};
pub use corpus_ingest::{HashingEncoder, RawItem, TextEncoder};

// API result types
pub use types::{IndexInfo, LabeledVector, SearchMatch, DEFAULT_PROBE_COUNT};
