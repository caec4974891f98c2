//! Page-tolerant PDF text extraction.

use crate::error::{IngestError, IngestResult};
use silo_core::{strip_nul, SourceDocument};
use tracing::{debug, warn};

/// Turns one source document into its raw text.
///
/// A trait so the pipeline can be exercised without real PDF fixtures.
pub trait TextExtractor: Send + Sync {
    /// Extract the document's full text. An unreadable document is an error;
    /// a readable document with no recoverable text returns an empty string.
    fn extract(&self, document: &SourceDocument) -> IngestResult<String>;
}

/// PDF extractor that recovers text page by page, so corruption in one page
/// never discards the rest of the document.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, document: &SourceDocument) -> IngestResult<String> {
        let doc = lopdf::Document::load(&document.path).map_err(|e| IngestError::Extraction {
            path: document.path.clone(),
            message: format!("failed to open PDF: {}", e),
        })?;

        let mut full_text = String::new();

        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => {
                    if !text.trim().is_empty() {
                        full_text.push_str(&text);
                        full_text.push('\n');
                    }
                }
                Err(e) => {
                    warn!(
                        "Skipping page {} of {}: {}",
                        page_number, document.filename, e
                    );
                }
            }
        }

        debug!(
            "Extracted {} characters from {}",
            full_text.len(),
            document.filename
        );

        Ok(strip_nul(&full_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use tempfile::tempdir;

    /// Build a minimal one-page PDF containing the given text.
    fn write_pdf(path: &std::path::Path, text: &str) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_extract_generated_pdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.pdf");
        write_pdf(&path, "Hello World");

        let extractor = PdfExtractor::new();
        let text = extractor
            .extract(&SourceDocument::new("CORE", &path))
            .unwrap();

        assert!(text.contains("Hello World"));
    }

    #[test]
    fn test_unreadable_document_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let extractor = PdfExtractor::new();
        let err = extractor
            .extract(&SourceDocument::new("CORE", &path))
            .unwrap_err();

        assert!(matches!(err, IngestError::Extraction { .. }));
    }

    #[test]
    fn test_missing_document_is_an_error() {
        let extractor = PdfExtractor::new();
        let err = extractor
            .extract(&SourceDocument::new("CORE", "/nonexistent/doc.pdf"))
            .unwrap_err();

        assert!(matches!(err, IngestError::Extraction { .. }));
    }
}
