//! Error types for Gemini operations.

use thiserror::Error;

/// Errors that can occur when calling the Gemini API.
#[derive(Error, Debug)]
pub enum GeminiError {
    /// The API endpoint could not be reached.
    #[error("Gemini API is unreachable at {host}")]
    Unreachable { host: String },

    /// Request timeout.
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The provider's quota was exhausted.
    #[error("Embedding quota exceeded: {message}")]
    QuotaExceeded { message: String },

    /// API returned an error response.
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response carried no embedding.
    #[error("Response contained no embedding values")]
    EmptyEmbedding,

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;
