//! Core types for corpusdb.
//!
//! This crate defines the shared vocabulary of the workspace: record and
//! configuration types, the metadata value model, scan filters, and the
//! error taxonomy. It performs no I/O; storage and indexing live in the
//! `corpus-store` and `corpus-index` crates.

pub mod config;
pub mod error;
pub mod filter;
pub mod types;
pub mod value;

pub use config::{DistanceMetric, StoreConfig};
pub use error::{Error, Result};
pub use filter::MetadataFilter;
pub use types::{NewRecord, RecordId, VectorRecord};
pub use value::Value;
