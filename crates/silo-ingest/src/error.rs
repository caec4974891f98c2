//! Error types for the ingestion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur during ingestion.
///
/// All of these are recoverable at some level of the pipeline: extraction and
/// storage errors fail one document, embedding errors drop one fragment. Only
/// configuration problems abort a run, and those never reach this type.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction failed for {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Storage failed: {0}")]
    Storage(String),
}
