//! Error types for the resolution engine

use thiserror::Error;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Main error type for the resolution engine
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Normalization left no usable text; no upstream fetch is attempted.
    #[error("empty query: no alphanumeric content")]
    EmptyQuery,

    /// The correction dictionary could not be loaded. Recoverable: the
    /// pipeline runs uncorrected when this happens.
    #[error("dictionary load error: {0}")]
    DictionaryLoad(String),

    /// Candidate fetch failed (network, auth). Propagated to the caller
    /// unchanged; the engine never retries on its own.
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResolveError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::Upstream(_))
    }

    /// Failures the pipeline absorbs by degrading instead of aborting
    pub fn is_degradation(&self) -> bool {
        matches!(self, ResolveError::DictionaryLoad(_))
    }
}
