//! Durable vector record store.
//!
//! `RecordStore` is the sole writer of truth: keyed storage of
//! `(id, text, metadata, embedding)` tuples with a store-wide fixed
//! embedding dimension. Writes are serialized and batch-atomic; reads run
//! concurrently and never observe a partially applied batch.
//!
//! Durability is an append-only record log (`log` module): every committed
//! write is one framed writeset, applied to the in-memory table only after
//! it is on disk. The approximate index built over this store lives in
//! `corpus-index` and is a separate, rebuildable artifact.

mod log;
mod scan;
mod snapshot;
mod store;

pub use scan::Scan;
pub use snapshot::StoreSnapshot;
pub use store::RecordStore;
