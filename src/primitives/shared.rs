//! State shared by all primitive facades.

use corpus_index::IvfIndex;
use corpus_store::RecordStore;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

/// One store, one live-index slot, one optional artifact location.
///
/// The index slot holds an `Arc` so a rebuild swaps the pointer while
/// in-flight queries keep the old index alive until they complete.
pub(crate) struct Shared {
    pub(crate) store: Arc<RecordStore>,
    pub(crate) index: RwLock<Option<Arc<IvfIndex>>>,
    pub(crate) artifact_path: Option<PathBuf>,
}
