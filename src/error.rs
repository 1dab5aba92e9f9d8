//! Error types for the highlight engine.
//!
//! Most failure modes of the engine (unmatched snippets, pages without text,
//! stale results) are ordinary outcomes and never surface here. This enum
//! only covers input rejected at the boundary and tool-level I/O.

/// Result type alias for highlight engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while preparing or serving a highlight.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page numbers are zero-based and must not be negative
    #[error("Invalid page number: {0}")]
    InvalidPageNumber(i64),

    /// Normalized query is too short to search
    #[error("Query rejected: {length} characters after normalization (minimum {minimum})")]
    QueryRejected {
        /// Character count after normalization
        length: usize,
        /// Configured minimum
        minimum: usize,
    },

    /// Page-to-viewport transform cannot be used
    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
