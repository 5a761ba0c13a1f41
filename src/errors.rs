//! Unified error types for `BillEase`.

use thiserror::Error;

/// Every failure the library can report to its caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The persistence medium rejected a write, or the store refused one
    #[error("Storage error for key `{key}`: {message}")]
    Storage {
        /// Storage key the write was addressed to
        key: String,
        /// What went wrong
        message: String,
    },

    /// One stored invoice could not be decoded
    #[error("Saved invoice #{index} (id `{id}`) is invalid: {source}")]
    InvalidRecord {
        /// 1-based position in the stored collection
        index: usize,
        /// Id as stored, or `?` when missing
        id: String,
        /// Decoder failure
        source: serde_json::Error,
    },

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
