//! Training export.

use crate::primitives::shared::Shared;
use crate::types::LabeledVector;
use corpus_core::MetadataFilter;
use std::sync::Arc;

/// Export of labeled vectors for classifier training.
///
/// Access via `db.training`.
pub struct Training {
    shared: Arc<Shared>,
}

impl Training {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Training { shared }
    }

    /// Fetch `(id, embedding, label)` for every record whose metadata
    /// carries a `label` key.
    ///
    /// Records without a label are skipped, never an error. Scalar label
    /// values are rendered to text; records whose label is a structured
    /// value or null are skipped as unlabeled. Results are in ascending id
    /// order.
    pub fn fetch_labeled(&self) -> Vec<LabeledVector> {
        let filter = MetadataFilter::new().has("label");
        self.shared
            .store
            .scan(Some(filter))
            .filter_map(|record| {
                let label = record.metadata_field("label")?.scalar_to_text()?;
                Some(LabeledVector {
                    id: record.id,
                    embedding: record.embedding,
                    label,
                })
            })
            .collect()
    }
}
