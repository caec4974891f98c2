//! Domain types for the Silo ingestion pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named silo of documents, mapped to one source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub root: PathBuf,
}

impl Category {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// One document file discovered on disk. Immutable for the duration of a run;
/// every run rediscovers documents from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name used as the document's display identity.
    pub filename: String,
    /// Name of the silo the document belongs to.
    pub category: String,
    /// Absolute path to the file.
    pub path: PathBuf,
}

impl SourceDocument {
    pub fn new(category: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self {
            filename,
            category: category.into(),
            path,
        }
    }
}

/// A bounded slice of a document's extracted text, the unit of embedding.
///
/// `index` is the fragment's 0-based position in the emitted sequence, not
/// its character offset in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFragment {
    pub index: usize,
    pub content: String,
}

impl TextFragment {
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }

    /// Fragment length in characters (the unit chunking operates in).
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Provenance metadata persisted alongside each fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub filename: String,
    pub category: String,
    pub chunk_index: usize,
}

/// The unit of persistence: fragment text, provenance, and its embedding.
///
/// Created only after the fragment's embedding succeeded; never mutated.
/// The serialized shape is the vector store's row shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub content: String,
    pub metadata: RecordMetadata,
    pub embedding: Vec<f32>,
}

impl KnowledgeRecord {
    pub fn new(document: &SourceDocument, fragment: &TextFragment, embedding: Vec<f32>) -> Self {
        Self {
            content: fragment.content.clone(),
            metadata: RecordMetadata {
                filename: document.filename.clone(),
                category: document.category.clone(),
                chunk_index: fragment.index,
            },
            embedding,
        }
    }
}

/// Per-category ingestion counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: String,
    /// Documents found by the locator (qualifying files only).
    pub documents_found: usize,
    /// Documents with at least one record stored.
    pub processed: usize,
    /// Documents that failed (extraction or storage).
    pub failed: usize,
    /// Documents skipped without a write (empty text, nothing embedded).
    pub skipped: usize,
    /// Total records written for this category.
    pub records_stored: usize,
}

impl CategorySummary {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }
}

/// Aggregated result of one full ingestion run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub categories: Vec<CategorySummary>,
}

impl RunSummary {
    pub fn push(&mut self, category: CategorySummary) {
        self.categories.push(category);
    }

    pub fn documents_processed(&self) -> usize {
        self.categories.iter().map(|c| c.processed).sum()
    }

    pub fn documents_failed(&self) -> usize {
        self.categories.iter().map(|c| c.failed).sum()
    }

    pub fn documents_skipped(&self) -> usize {
        self.categories.iter().map(|c| c.skipped).sum()
    }

    pub fn records_stored(&self) -> usize {
        self.categories.iter().map(|c| c.records_stored).sum()
    }
}

/// Strip embedded NUL bytes from extracted text. PDF text streams routinely
/// carry them, and the store rejects them.
pub fn strip_nul(text: &str) -> String {
    if text.contains('\0') {
        text.replace('\0', "")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_document_filename() {
        let doc = SourceDocument::new("CORE", "/corpus/core/ley-39-2015.pdf");
        assert_eq!(doc.filename, "ley-39-2015.pdf");
        assert_eq!(doc.category, "CORE");
    }

    #[test]
    fn test_record_wire_shape() {
        let doc = SourceDocument::new("BOE", "/corpus/boe/convocatoria.pdf");
        let fragment = TextFragment::new(2, "some fragment text");
        let record = KnowledgeRecord::new(&doc, &fragment, vec![0.1, 0.2]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["content"], "some fragment text");
        assert_eq!(value["metadata"]["filename"], "convocatoria.pdf");
        assert_eq!(value["metadata"]["category"], "BOE");
        assert_eq!(value["metadata"]["chunk_index"], 2);
        assert_eq!(value["embedding"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_run_summary_totals() {
        let mut summary = RunSummary::default();
        let mut a = CategorySummary::new("CORE");
        a.processed = 3;
        a.failed = 1;
        a.records_stored = 12;
        let mut b = CategorySummary::new("PRACTICE");
        b.processed = 2;
        b.skipped = 1;
        b.records_stored = 5;
        summary.push(a);
        summary.push(b);

        assert_eq!(summary.documents_processed(), 5);
        assert_eq!(summary.documents_failed(), 1);
        assert_eq!(summary.documents_skipped(), 1);
        assert_eq!(summary.records_stored(), 17);
    }

    #[test]
    fn test_strip_nul() {
        assert_eq!(strip_nul("a\0b\0c"), "abc");
        assert_eq!(strip_nul("clean"), "clean");
    }
}
