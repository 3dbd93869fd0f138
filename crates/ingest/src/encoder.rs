//! The embedding-model boundary.

/// Failure of a batched encode, positioned at the offending item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEncodeError {
    /// Zero-based position of the item the encoder failed on
    pub position: usize,
    /// Failure reported by the encoder
    pub reason: String,
}

/// An external embedding model: `encode(text) -> vector<f32, D>`.
///
/// Implementations must be deterministic for a fixed model version - index
/// builds are only reproducible if re-encoding the same text yields the same
/// vector. Every vector returned must have length [`dimension`], which the
/// pipeline checks against the store before encoding anything.
///
/// `encode_batch` exists so implementations backed by models with high
/// fixed overhead can amortize it; the provided implementation simply loops
/// and reports the position of the first failure.
///
/// [`dimension`]: TextEncoder::dimension
pub trait TextEncoder: Send + Sync {
    /// Output dimension of this model.
    fn dimension(&self) -> usize;

    /// Encode one text into an embedding.
    fn encode(&self, text: &str) -> Result<Vec<f32>, String>;

    /// Encode a batch, reporting the position of the first failure.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, BatchEncodeError> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for (position, text) in texts.iter().enumerate() {
            let embedding = self
                .encode(text)
                .map_err(|reason| BatchEncodeError { position, reason })?;
            embeddings.push(embedding);
        }
        Ok(embeddings)
    }
}
