//! Main database entry point for corpusdb.

use crate::primitives::{shared::Shared, Index, Ingest, Records, Training};
use corpus_core::{DistanceMetric, Error, Result, StoreConfig};
use corpus_index::load_artifact;
use corpus_store::RecordStore;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// File name of the index artifact within a store directory.
pub(crate) const INDEX_ARTIFACT_FILE: &str = "index.ivf";

/// The corpusdb handle.
///
/// Create one with [`Corpus::open`], [`Corpus::builder`], or
/// [`Corpus::ephemeral`], then work through the primitive facades:
///
/// - [`records`](Corpus::records) - insert, get, scan
/// - [`ingest`](Corpus::ingest) - encode-and-insert pipelines
/// - [`index`](Corpus::index) - build and query the similarity index
/// - [`training`](Corpus::training) - export labeled vectors
///
/// The handle is cheap to share: all facades reference the same store and
/// the same live-index slot.
pub struct Corpus {
    /// Record operations
    pub records: Records,

    /// Ingestion pipeline
    pub ingest: Ingest,

    /// Similarity index operations
    pub index: Index,

    /// Training export
    pub training: Training,
}

impl Corpus {
    /// Open a store at `dir` with the given configuration.
    ///
    /// Idempotent initialization: a fresh directory is created and an
    /// existing store is replayed, as long as the configuration matches;
    /// a dimension or metric mismatch fails with `SchemaConflict`. A
    /// previously persisted index artifact is loaded so similarity search
    /// works immediately (and reports its recorded `built_at`).
    pub fn open(dir: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let store = RecordStore::open(dir, config)?;

        let artifact_path = dir.join(INDEX_ARTIFACT_FILE);
        let index = if artifact_path.exists() {
            let loaded = load_artifact(&artifact_path)?;
            if loaded.dimension() != config.dimension || loaded.metric() != config.metric {
                return Err(Error::SchemaConflict {
                    existing: format!(
                        "index artifact: dimension={} metric={}",
                        loaded.dimension(),
                        loaded.metric().name()
                    ),
                    requested: config.describe(),
                });
            }
            info!(built_at = loaded.built_at(), "loaded persisted index");
            Some(Arc::new(loaded))
        } else {
            None
        };

        Ok(Self::assemble(store, index, Some(artifact_path)))
    }

    /// Create a store with no disk backing.
    ///
    /// No files are created; records and any built index are lost on drop.
    /// Useful for tests and short-lived pipelines.
    pub fn ephemeral(config: StoreConfig) -> Self {
        Self::assemble(RecordStore::ephemeral(config), None, None)
    }

    /// Create a builder for database configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Corpus::builder()
    ///     .path("./my-corpus")
    ///     .dimension(384)
    ///     .metric(DistanceMetric::Euclidean)
    ///     .open()?;
    /// ```
    pub fn builder() -> CorpusBuilder {
        CorpusBuilder::new()
    }

    fn assemble(
        store: RecordStore,
        index: Option<Arc<corpus_index::IvfIndex>>,
        artifact_path: Option<PathBuf>,
    ) -> Self {
        let shared = Arc::new(Shared {
            store: Arc::new(store),
            index: RwLock::new(index),
            artifact_path,
        });
        Corpus {
            records: Records::new(shared.clone()),
            ingest: Ingest::new(shared.clone()),
            index: Index::new(shared.clone()),
            training: Training::new(shared),
        }
    }
}

/// Builder for database configuration.
///
/// `dimension` is mandatory (directly or through
/// [`config`](CorpusBuilder::config)); the metric defaults to Euclidean.
pub struct CorpusBuilder {
    path: Option<PathBuf>,
    dimension: Option<usize>,
    metric: DistanceMetric,
}

impl CorpusBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        CorpusBuilder {
            path: None,
            dimension: None,
            metric: DistanceMetric::default(),
        }
    }

    /// Set the store directory path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the embedding dimension.
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Set the distance metric (default: Euclidean).
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Apply a full configuration in one call.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.dimension = Some(config.dimension);
        self.metric = config.metric;
        self
    }

    fn build_config(&self) -> Result<StoreConfig> {
        let dimension = self.dimension.ok_or_else(|| {
            Error::InvalidParameter("embedding dimension must be set before open".into())
        })?;
        StoreConfig::new(dimension, self.metric)
    }

    /// Open the disk-backed store at the configured path.
    pub fn open(self) -> Result<Corpus> {
        let config = self.build_config()?;
        let path = self.path.ok_or_else(|| {
            Error::InvalidParameter("path must be set before open (or use ephemeral())".into())
        })?;
        Corpus::open(path, config)
    }

    /// Build an ephemeral (no-disk) store.
    pub fn ephemeral(self) -> Result<Corpus> {
        Ok(Corpus::ephemeral(self.build_config()?))
    }
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}
