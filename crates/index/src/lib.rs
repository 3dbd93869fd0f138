//! Inverted-file (IVF) approximate nearest neighbor index.
//!
//! The index is built from a [`corpus_store::StoreSnapshot`] by clustering
//! the embedding space into `num_partitions` partitions and recording, per
//! partition, the centroid plus the member record ids. It is read-only after
//! build: records inserted later are not reflected until the caller rebuilds,
//! and the `built_at` marker makes that staleness observable rather than
//! silent.
//!
//! Queries probe the `probe_count` nearest centroids and compute exact
//! distances over those partitions' members only; raising `probe_count` to
//! `num_partitions` degenerates to exact search.

mod artifact;
mod cancel;
mod ivf;
mod kmeans;

pub use artifact::{load_artifact, save_artifact};
pub use cancel::CancelToken;
pub use ivf::{IvfIndex, IvfParams, Partition, DEFAULT_MAX_ITERATIONS};
