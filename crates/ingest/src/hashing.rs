//! A deterministic token-hashing encoder.
//!
//! Not a learned model: each lowercased alphanumeric token is hashed into a
//! bucket of the output vector (sign taken from the hash), and the result is
//! L2-normalized. Texts sharing tokens land near each other, which is all
//! the pipeline and index need for tests, demos, and offline smoke runs
//! where a real sentence encoder is unavailable.

use crate::encoder::TextEncoder;
use corpus_core::{Error, Result};

/// Feature-hashing text encoder with a fixed output dimension.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dimension: usize,
}

impl HashingEncoder {
    /// Create an encoder with the given output dimension.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidParameter(
                "encoder dimension must be > 0".into(),
            ));
        }
        Ok(HashingEncoder { dimension })
    }
}

impl TextEncoder for HashingEncoder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> std::result::Result<Vec<f32>, String> {
        let mut vector = vec![0.0f32; self.dimension];
        let lowered = text.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            let hash = crc32fast::hash(token.as_bytes());
            let bucket = (hash as usize) % self.dimension;
            let sign = if hash & 0x8000_0000 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }
        Ok(vector)
    }
}
