//! Unified error types for corpusdb.
//!
//! This is the canonical error type for all operations in the workspace.
//! Validation errors are raised before any mutation, so a failed operation
//! never leaves partial state behind.

use crate::types::RecordId;
use thiserror::Error;

/// All corpusdb errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Embedding length does not match the store's configured dimension.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension the store was created with
        expected: usize,
        /// Dimension of the offending vector
        got: usize,
    },

    /// A store already exists at this location with a different configuration.
    #[error("schema conflict: store has {existing}, requested {requested}")]
    SchemaConflict {
        /// Configuration recorded in the existing store
        existing: String,
        /// Configuration requested by the caller
        requested: String,
    },

    /// Input failed validation (e.g. empty text).
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A batch operation failed on a specific item; nothing was persisted.
    #[error("batch item {index}: {source}")]
    BatchItem {
        /// Zero-based position of the failing item within the batch
        index: usize,
        /// The underlying validation failure
        #[source]
        source: Box<Error>,
    },

    /// Record does not exist.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// An index build was requested against a store with no records.
    #[error("cannot build index over an empty store")]
    EmptyStore,

    /// A parameter is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A similarity query was issued before any index build.
    #[error("no index has been built for this store")]
    IndexNotBuilt,

    /// The external encoder failed; the enclosing batch was aborted.
    #[error("encoding failed at item {position}: {reason}")]
    EncodingError {
        /// Zero-based position of the item the encoder failed on
        position: usize,
        /// Failure reported by the encoder
        reason: String,
    },

    /// The operation was canceled by the caller before completion.
    #[error("operation canceled")]
    Canceled,

    /// I/O error from the record log or an index artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// On-disk data failed an integrity check.
    #[error("corruption: {0}")]
    Corruption(String),
}

/// Result type for corpusdb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a validation failure with the batch position it occurred at.
    pub fn at_batch_index(self, index: usize) -> Self {
        Error::BatchItem {
            index,
            source: Box::new(self),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this error is an expected, recoverable condition.
    ///
    /// `NotFound` and `IndexNotBuilt` are part of normal control flow and
    /// callers are expected to handle them; everything else indicates a
    /// rejected operation or an environment failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::IndexNotBuilt)
    }

    /// Check if this error was detected before any mutation took place.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::DimensionMismatch { .. }
                | Error::ValidationError(_)
                | Error::InvalidParameter(_)
                | Error::BatchItem { .. }
        )
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(e: rmp_serde::encode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
