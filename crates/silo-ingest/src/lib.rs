//! Silo Ingest - The ingestion pipeline.
//!
//! This crate provides:
//! - Document discovery per category (locator)
//! - Page-tolerant PDF text extraction
//! - Fixed-window text chunking
//! - The orchestrating pipeline: extract -> chunk -> embed -> store

mod chunker;
mod error;
mod extractor;
mod locator;
mod pipeline;

pub use chunker::{ChunkConfig, Chunker};
pub use error::{IngestError, IngestResult};
pub use extractor::{PdfExtractor, TextExtractor};
pub use locator::DocumentLocator;
pub use pipeline::{
    DocumentOutcome, EmbeddingProvider, FixedDelayPacer, IngestionPipeline, NoopPacer, Pacer,
    SkipReason, VectorSink,
};
