//! Error types for store backends and the fatal/transient classification.

use std::fmt;

use thiserror::Error;

/// Errors produced by queue and dedup-set backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure in a file-backed store.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    /// An entry could not be encoded or decoded.
    #[error("store codec error: {0}")]
    Codec(#[from] serde_json::Error),
    /// Redis command or connection failure.
    #[cfg(feature = "redis")]
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

/// Marker for an error that must stop the whole service.
///
/// The marker sits inside an [`anyhow::Error`] chain, so further `.context(..)`
/// calls keep it reachable through [`is_fatal`].
#[derive(Debug)]
pub struct Fatal(anyhow::Error);

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fatal error")
    }
}

impl std::error::Error for Fatal {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Wrap `err` with the fatal marker.
pub fn fatal(err: impl Into<anyhow::Error>) -> anyhow::Error {
    anyhow::Error::new(Fatal(err.into()))
}

/// Returns true if a fatal marker appears anywhere in the cause chain.
#[must_use]
pub fn is_fatal(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<Fatal>())
}
