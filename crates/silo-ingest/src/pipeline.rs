//! The ingestion pipeline: extract -> chunk -> embed -> store.
//!
//! Strictly sequential, one outstanding remote call at a time. Failures are
//! absorbed at the smallest enclosing unit: a page failure costs a page, an
//! embedding failure costs a fragment, an extraction or storage failure costs
//! a document. Only configuration problems abort a run, and those are
//! resolved before a pipeline exists.

use crate::chunker::Chunker;
use crate::error::{IngestError, IngestResult};
use crate::extractor::TextExtractor;
use crate::locator::DocumentLocator;
use async_trait::async_trait;
use silo_core::{Category, CategorySummary, KnowledgeRecord, RunSummary, SourceDocument};
use silo_gemini::GeminiClient;
use silo_store::SupabaseStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Produces one embedding vector per text fragment.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> IngestResult<Vec<f32>>;
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str) -> IngestResult<Vec<f32>> {
        GeminiClient::embed(self, text)
            .await
            .map_err(|e| IngestError::Embedding(e.to_string()))
    }
}

/// Receives one document's batch of records.
#[async_trait]
pub trait VectorSink: Send + Sync {
    async fn insert_batch(&self, records: &[KnowledgeRecord]) -> IngestResult<()>;
}

#[async_trait]
impl VectorSink for SupabaseStore {
    async fn insert_batch(&self, records: &[KnowledgeRecord]) -> IngestResult<()> {
        self.insert_records(records)
            .await
            .map_err(|e| IngestError::Storage(e.to_string()))
    }
}

/// Pacing policy applied before every embedding call.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Production pacer: a fixed delay before each call, keeping the run inside
/// the provider's request quota.
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Pacer that never waits, for tests.
#[derive(Debug, Clone, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}

/// Why a document produced no records without being a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The document opened but no text was recovered.
    EmptyText,
    /// All extracted text fell below the minimum fragment length.
    NoFragments,
    /// Every fragment's embedding call failed; nothing to write.
    NothingEmbedded,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            SkipReason::EmptyText => "no text extracted",
            SkipReason::NoFragments => "no fragments above minimum length",
            SkipReason::NothingEmbedded => "no fragment could be embedded",
        };
        write!(f, "{}", reason)
    }
}

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The document's batch was written.
    Stored { records: usize },
    /// Nothing was written; the reason says why that is expected.
    Skipped { reason: SkipReason },
}

/// The ingestion pipeline.
pub struct IngestionPipeline {
    locator: DocumentLocator,
    extractor: Box<dyn TextExtractor>,
    chunker: Chunker,
    embedder: Arc<dyn EmbeddingProvider>,
    sink: Arc<dyn VectorSink>,
    pacer: Box<dyn Pacer>,
}

impl IngestionPipeline {
    pub fn new(
        extractor: Box<dyn TextExtractor>,
        chunker: Chunker,
        embedder: Arc<dyn EmbeddingProvider>,
        sink: Arc<dyn VectorSink>,
        pacer: Box<dyn Pacer>,
    ) -> Self {
        Self {
            locator: DocumentLocator::new(),
            extractor,
            chunker,
            embedder,
            sink,
            pacer,
        }
    }

    /// Run a full ingestion pass over every category, in order.
    ///
    /// Never fails: per-document errors are counted, logged and absorbed. The
    /// returned summary is the run's only output.
    pub async fn run(&self, categories: &[Category]) -> RunSummary {
        let mut summary = RunSummary::default();

        for category in categories {
            info!("Processing silo: {}", category.name);

            let documents = self.locator.list_documents(category);
            info!("Found {} PDF files", documents.len());

            let mut counts = CategorySummary::new(&category.name);
            counts.documents_found = documents.len();

            for document in &documents {
                match self.ingest_document(document).await {
                    Ok(DocumentOutcome::Stored { records }) => {
                        info!("Stored {}: {} records", document.filename, records);
                        counts.processed += 1;
                        counts.records_stored += records;
                    }
                    Ok(DocumentOutcome::Skipped { reason }) => {
                        info!("Skipped {}: {}", document.filename, reason);
                        counts.skipped += 1;
                    }
                    Err(e) => {
                        warn!("Failed {}: {}", document.filename, e);
                        counts.failed += 1;
                    }
                }
            }

            summary.push(counts);
        }

        summary
    }

    /// Ingest a single document: extract, chunk, embed fragment by fragment,
    /// then write the batch in one insert.
    ///
    /// The batch is per-document: it bounds both memory and the blast radius
    /// of a failed insert while amortizing the write round-trip.
    pub async fn ingest_document(
        &self,
        document: &SourceDocument,
    ) -> IngestResult<DocumentOutcome> {
        let text = self.extractor.extract(document)?;
        if text.trim().is_empty() {
            return Ok(DocumentOutcome::Skipped {
                reason: SkipReason::EmptyText,
            });
        }

        let fragments = self.chunker.chunk(&text);
        if fragments.is_empty() {
            return Ok(DocumentOutcome::Skipped {
                reason: SkipReason::NoFragments,
            });
        }
        debug!("{}: {} fragments", document.filename, fragments.len());

        let mut batch = Vec::new();
        for fragment in &fragments {
            self.pacer.pause().await;

            match self.embedder.embed(&fragment.content).await {
                Ok(embedding) => {
                    batch.push(KnowledgeRecord::new(document, fragment, embedding));
                }
                Err(e) => {
                    // One fragment's failure never blocks its siblings.
                    warn!(
                        "Embedding failed for {} fragment {}: {}",
                        document.filename, fragment.index, e
                    );
                }
            }
        }

        if batch.is_empty() {
            return Ok(DocumentOutcome::Skipped {
                reason: SkipReason::NothingEmbedded,
            });
        }

        let records = batch.len();
        self.sink.insert_batch(&batch).await?;

        Ok(DocumentOutcome::Stored { records })
    }
}
