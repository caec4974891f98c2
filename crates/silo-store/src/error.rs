//! Error types for vector-store operations.

use thiserror::Error;

/// Errors that can occur when writing to the vector store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store endpoint could not be reached.
    #[error("Vector store is unreachable at {url}")]
    Unreachable { url: String },

    /// Request timeout.
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The store rejected the batch.
    #[error("Store error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
