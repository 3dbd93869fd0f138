//! Ingestion pipeline: raw `(text, label)` items to stored vector records.
//!
//! The embedding model is an external collaborator behind the
//! [`TextEncoder`] trait. The pipeline validates the encoder's dimension
//! against the store before any encoding happens, encodes the whole batch,
//! and delegates to the store's atomic batch insert - so an ingest either
//! lands completely or not at all.

mod encoder;
mod hashing;
mod pipeline;

pub use encoder::{BatchEncodeError, TextEncoder};
pub use hashing::HashingEncoder;
pub use pipeline::{ingest_batch, RawItem};
