//! The IVF index structure: build and query.

use crate::cancel::CancelToken;
use crate::kmeans;
use corpus_core::{DistanceMetric, Error, RecordId, Result};
use corpus_store::{RecordStore, StoreSnapshot};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Iteration cap for the clustering pass when none is given.
pub const DEFAULT_MAX_ITERATIONS: usize = 25;

/// Build parameters for an IVF index.
///
/// All knobs are explicit; nothing is read from ambient state. A `seed`
/// makes the clustering pass reproducible; without one a random seed is
/// drawn and recorded on the built index, so any build can be reproduced
/// after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IvfParams {
    /// Number of partitions (clustering granularity)
    pub num_partitions: usize,
    /// Clustering seed; `None` draws one at build time
    pub seed: Option<u64>,
    /// Iteration cap for the clustering pass
    pub max_iterations: usize,
}

impl IvfParams {
    /// Parameters with the default iteration cap and a random seed.
    pub fn new(num_partitions: usize) -> Self {
        IvfParams {
            num_partitions,
            seed: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Fix the clustering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One partition: its centroid and the ids assigned to it.
///
/// Member lists are sorted ascending. The index holds ids only; embeddings
/// are resolved through the store at query time, which keeps the store the
/// single source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Cluster centroid
    pub centroid: Vec<f32>,
    /// Member record ids, ascending
    pub members: Vec<RecordId>,
}

/// An immutable inverted-file index over a store snapshot.
///
/// Built by [`IvfIndex::build`]; replaced wholesale by each subsequent
/// build. `built_at` is the store's write counter at snapshot time - compare
/// it against the live counter to detect staleness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvfIndex {
    dimension: usize,
    metric: DistanceMetric,
    num_partitions: usize,
    seed: u64,
    built_at: u64,
    partitions: Vec<Partition>,
}

impl IvfIndex {
    /// Build an index over a store snapshot.
    ///
    /// # Errors
    ///
    /// - `EmptyStore` if the snapshot holds no records
    /// - `InvalidParameter` if `num_partitions` is zero or exceeds the
    ///   record count
    ///
    /// Determinism: a fixed `params.seed` over the same snapshot yields
    /// identical partition membership.
    pub fn build(snapshot: &StoreSnapshot, params: &IvfParams) -> Result<Self> {
        Self::build_with_cancel(snapshot, params, &CancelToken::new())
    }

    /// Build with a cancellation token.
    ///
    /// Cancellation is polled between clustering iterations; a canceled
    /// build returns `Canceled` and has no observable effect.
    pub fn build_with_cancel(
        snapshot: &StoreSnapshot,
        params: &IvfParams,
        cancel: &CancelToken,
    ) -> Result<Self> {
        if snapshot.is_empty() {
            return Err(Error::EmptyStore);
        }
        if params.num_partitions == 0 {
            return Err(Error::InvalidParameter(
                "num_partitions must be > 0".into(),
            ));
        }
        if params.num_partitions > snapshot.len() {
            return Err(Error::InvalidParameter(format!(
                "num_partitions ({}) exceeds record count ({})",
                params.num_partitions,
                snapshot.len()
            )));
        }

        let config = snapshot.config();
        let seed = params.seed.unwrap_or_else(rand::random);
        let points: Vec<&[f32]> = snapshot
            .records()
            .iter()
            .map(|r| r.embedding.as_slice())
            .collect();

        let clustering = kmeans::lloyd(
            &points,
            params.num_partitions,
            config.metric,
            seed,
            params.max_iterations,
            cancel,
        )?;

        let mut partitions: Vec<Partition> = clustering
            .centroids
            .into_iter()
            .map(|centroid| Partition {
                centroid,
                members: Vec::new(),
            })
            .collect();
        for (record, assignment) in snapshot.records().iter().zip(clustering.assignments) {
            partitions[assignment].members.push(record.id);
        }
        // Snapshot records are id-ordered, so member lists already are; keep
        // the invariant explicit regardless.
        for partition in partitions.iter_mut() {
            partition.members.sort_unstable();
        }

        info!(
            records = snapshot.len(),
            num_partitions = params.num_partitions,
            seed,
            built_at = snapshot.write_version(),
            "built ivf index"
        );

        Ok(IvfIndex {
            dimension: config.dimension,
            metric: config.metric,
            num_partitions: params.num_partitions,
            seed,
            built_at: snapshot.write_version(),
            partitions,
        })
    }

    /// Approximate k-nearest-neighbor query.
    ///
    /// Probes the `probe_count` partitions whose centroids are nearest to
    /// `query`, computes exact distances over their members, and returns the
    /// `k` closest ordered by ascending `(distance, id)`. With
    /// `probe_count >= num_partitions` every record is examined and the
    /// result equals a brute-force scan.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if `query` has the wrong length
    /// - `InvalidParameter` if `k` or `probe_count` is zero
    pub fn query(
        &self,
        store: &RecordStore,
        query: &[f32],
        k: usize,
        probe_count: usize,
    ) -> Result<Vec<(RecordId, f32)>> {
        if query.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                got: query.len(),
            });
        }
        if k == 0 {
            return Err(Error::InvalidParameter("k must be > 0".into()));
        }
        if probe_count == 0 {
            return Err(Error::InvalidParameter("probe_count must be > 0".into()));
        }

        // Rank partitions by centroid distance; ties resolve by partition
        // index so probing is deterministic.
        let mut ranked: Vec<(usize, f32)> = self
            .partitions
            .iter()
            .enumerate()
            .map(|(idx, partition)| (idx, self.metric.distance(query, &partition.centroid)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        ranked.truncate(probe_count.min(self.partitions.len()));

        let mut candidates: Vec<(RecordId, f32)> = Vec::new();
        for (partition_idx, _) in ranked {
            for &id in &self.partitions[partition_idx].members {
                // The store has no delete path, so members always resolve;
                // skip defensively rather than failing the query.
                let Ok(record) = store.get(id) else { continue };
                candidates.push((id, self.metric.distance(query, &record.embedding)));
            }
        }

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        candidates.truncate(k);
        Ok(candidates)
    }

    /// The store's write counter at the moment the build snapshot was taken.
    pub fn built_at(&self) -> u64 {
        self.built_at
    }

    /// Check whether the store has been written to since this index was
    /// built. Stale indexes still answer queries; they just do not see the
    /// newer records.
    pub fn is_stale(&self, store: &RecordStore) -> bool {
        store.write_version() > self.built_at
    }

    /// Number of partitions.
    pub fn num_partitions(&self) -> usize {
        self.num_partitions
    }

    /// Seed the clustering pass ran with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Embedding dimension the index was built for.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Distance metric the index was built with.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Total number of indexed records.
    pub fn len(&self) -> usize {
        self.partitions.iter().map(|p| p.members.len()).sum()
    }

    /// Check if the index covers no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The partitions (centroid + members), for inspection and persistence.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }
}
