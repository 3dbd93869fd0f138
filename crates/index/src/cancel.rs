//! Caller-driven cancellation for index builds.

use corpus_core::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation flag shared between a build and its caller.
///
/// The builder polls the token between clustering iterations; a canceled
/// build returns [`Error::Canceled`] without having mutated anything. Clones
/// share the same flag, so the caller keeps one clone and hands the other to
/// the build.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-canceled state.
    pub fn new() -> Self {
        CancelToken::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check whether cancellation was requested.
    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Return `Err(Canceled)` if cancellation was requested.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_canceled() {
            Err(Error::Canceled)
        } else {
            Ok(())
        }
    }
}
