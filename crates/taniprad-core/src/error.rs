//! Error types for the taniprad-core library.
//!
//! The extraction pipeline itself is total: malformed documents degrade to
//! partial or zeroed fields instead of failing. Only the document ingestion
//! boundary can error.

use thiserror::Error;

/// Main error type for the taniprad library.
#[derive(Error, Debug)]
pub enum TanipradError {
    /// Malformed extracted-document payload.
    #[error("malformed document payload: {0}")]
    Input(#[from] serde_json::Error),

    /// I/O error while reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the taniprad library.
pub type Result<T> = std::result::Result<T, TanipradError>;
