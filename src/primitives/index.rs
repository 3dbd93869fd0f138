//! Similarity index operations.

use crate::primitives::shared::Shared;
use crate::types::{IndexInfo, SearchMatch, DEFAULT_PROBE_COUNT};
use corpus_core::{Error, Result};
use corpus_index::{save_artifact, CancelToken, IvfIndex, IvfParams};
use std::sync::Arc;
use tracing::info;

/// Index build and query operations.
///
/// Access via `db.index`. The index is read-only between explicit builds;
/// records inserted after a build stay invisible to search until the next
/// one. That staleness is observable through [`Index::is_stale`] and the
/// `built_at` field of [`IndexInfo`], never patched up silently.
pub struct Index {
    shared: Arc<Shared>,
}

impl Index {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Index { shared }
    }

    /// Build a fresh index over the store's current contents.
    ///
    /// Snapshots the store, clusters it into `params.num_partitions`
    /// partitions, persists the artifact (disk-backed stores), then swaps
    /// the live index. Queries running against the previous index finish
    /// undisturbed.
    ///
    /// # Errors
    ///
    /// - `EmptyStore` if the store holds no records
    /// - `InvalidParameter` if `num_partitions` is zero or exceeds the
    ///   record count
    pub fn build(&self, params: IvfParams) -> Result<IndexInfo> {
        self.build_with_cancel(params, &CancelToken::new())
    }

    /// Build with a cancellation token.
    ///
    /// A canceled build returns `Canceled`; the live index and the
    /// persisted artifact are left exactly as they were.
    pub fn build_with_cancel(&self, params: IvfParams, cancel: &CancelToken) -> Result<IndexInfo> {
        let snapshot = self.shared.store.snapshot();
        let built = IvfIndex::build_with_cancel(&snapshot, &params, cancel)?;

        if let Some(path) = &self.shared.artifact_path {
            save_artifact(&built, path)?;
        }

        let built = Arc::new(built);
        let information = describe(&built);
        *self.shared.index.write() = Some(built);
        info!(
            built_at = information.built_at,
            num_partitions = information.num_partitions,
            "swapped live index"
        );
        Ok(information)
    }

    /// Approximate similarity search with an explicit probe count.
    ///
    /// Probes the `probe_count` nearest partitions and returns the `k`
    /// closest records by ascending distance, ties broken by ascending id.
    /// `probe_count >= num_partitions` is exact search.
    ///
    /// # Errors
    ///
    /// - `IndexNotBuilt` if no index has been built or loaded
    /// - `DimensionMismatch` if the query length is wrong
    /// - `InvalidParameter` if `k` or `probe_count` is zero
    pub fn query(&self, query: &[f32], k: usize, probe_count: usize) -> Result<Vec<SearchMatch>> {
        let index = self.current()?;
        let hits = index.query(&self.shared.store, query, k, probe_count)?;

        let mut matches = Vec::with_capacity(hits.len());
        for (id, distance) in hits {
            let record = self.shared.store.get(id)?;
            matches.push(SearchMatch {
                id,
                distance,
                text: record.text,
                metadata: record.metadata,
            });
        }
        Ok(matches)
    }

    /// Similarity search with the default probe count
    /// ([`DEFAULT_PROBE_COUNT`]).
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchMatch>> {
        self.query(query, k, DEFAULT_PROBE_COUNT)
    }

    /// Description of the live index, or `None` before the first build.
    pub fn info(&self) -> Option<IndexInfo> {
        self.shared.index.read().as_ref().map(|index| describe(index))
    }

    /// Check whether the store has been written to since the live index was
    /// built.
    ///
    /// # Errors
    ///
    /// `IndexNotBuilt` if no index has been built or loaded.
    pub fn is_stale(&self) -> Result<bool> {
        Ok(self.current()?.is_stale(&self.shared.store))
    }

    fn current(&self) -> Result<Arc<IvfIndex>> {
        self.shared
            .index
            .read()
            .as_ref()
            .cloned()
            .ok_or(Error::IndexNotBuilt)
    }
}

fn describe(index: &IvfIndex) -> IndexInfo {
    IndexInfo {
        num_partitions: index.num_partitions(),
        seed: index.seed(),
        built_at: index.built_at(),
        dimension: index.dimension(),
        metric: index.metric(),
        indexed_records: index.len(),
    }
}
