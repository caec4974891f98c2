//! Document discovery per category.

use silo_core::{Category, SourceDocument};
use tracing::{debug, warn};

/// Finds the PDF documents belonging to a category.
#[derive(Debug, Clone, Default)]
pub struct DocumentLocator;

impl DocumentLocator {
    pub fn new() -> Self {
        Self
    }

    /// Recursively list the category's qualifying documents.
    ///
    /// A missing root directory is not fatal: it logs a warning and yields an
    /// empty list so the remaining categories still run. Results come back in
    /// filesystem-traversal order.
    pub fn list_documents(&self, category: &Category) -> Vec<SourceDocument> {
        if !category.root.exists() {
            warn!(
                "Root path not found for category {}: {}",
                category.name,
                category.root.display()
            );
            return Vec::new();
        }

        let mut documents = Vec::new();

        for entry in walkdir::WalkDir::new(&category.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            // Skip hidden files
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            let is_pdf = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);

            if !is_pdf {
                debug!("Skipping unsupported file: {:?}", path);
                continue;
            }

            documents.push(SourceDocument::new(&category.name, path));
        }

        documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_only_qualifying_files_returned() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("b.PDF"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("image.png"), b"x").unwrap();
        std::fs::write(dir.path().join("noext"), b"x").unwrap();

        let locator = DocumentLocator::new();
        let docs = locator.list_documents(&Category::new("CORE", dir.path()));

        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.category == "CORE"));
    }

    #[test]
    fn test_recursive_walk() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("2024").join("q1");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("deep.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("top.pdf"), b"x").unwrap();

        let locator = DocumentLocator::new();
        let docs = locator.list_documents(&Category::new("BOE", dir.path()));

        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_hidden_files_skipped() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("visible.pdf"), b"x").unwrap();

        let locator = DocumentLocator::new();
        let docs = locator.list_documents(&Category::new("CORE", dir.path()));

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "visible.pdf");
    }

    #[test]
    fn test_missing_root_yields_empty() {
        let locator = DocumentLocator::new();
        let docs = locator.list_documents(&Category::new("GONE", "/nonexistent/corpus"));
        assert!(docs.is_empty());
    }
}
