//! Run command - execute a full ingestion pass.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use silo_config::{Config, Credentials, EnvFile};
use silo_core::{Category, CategorySummary, RunSummary};
use silo_gemini::GeminiClient;
use silo_ingest::{
    ChunkConfig, Chunker, DocumentLocator, DocumentOutcome, FixedDelayPacer, IngestionPipeline,
    PdfExtractor,
};
use silo_store::SupabaseStore;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Run the ingestion pipeline over every configured category.
///
/// Configuration problems (bad settings file, missing credentials) are the
/// only errors that escape this function; per-document failures are counted
/// and the process still exits 0.
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path).context("Failed to load configuration")?;

    if config.categories.is_empty() {
        anyhow::bail!(
            "No categories configured. Add [[categories]] entries to {} (or run 'silo init').",
            config_path.display()
        );
    }

    // Credentials are resolved before any corpus I/O; a missing key stops
    // the run here, exiting non-zero.
    let env = EnvFile::load(Path::new(&config.general.env_file)).with_context(|| {
        format!("Failed to read environment file {}", config.general.env_file)
    })?;
    let credentials = Credentials::from_env_file(&env)?;

    let embedder =
        GeminiClient::from_config(&config.embedding, credentials.gemini_api_key.as_str())
            .context("Failed to create embedding client")?;
    let store = SupabaseStore::from_config(
        &config.store,
        credentials.supabase_url.as_str(),
        credentials.supabase_service_key.as_str(),
    )
    .context("Failed to create vector store client")?;

    let pipeline = IngestionPipeline::new(
        Box::new(PdfExtractor::new()),
        Chunker::new(ChunkConfig::from(&config.chunking)),
        Arc::new(embedder),
        Arc::new(store),
        Box::new(FixedDelayPacer::from_millis(config.embedding.request_delay_ms)),
    );

    let rt = Runtime::new().context("Failed to create async runtime")?;
    let locator = DocumentLocator::new();

    println!("{}", "Starting ingestion run...".cyan().bold());

    let mut summary = RunSummary::default();

    for category_config in &config.categories {
        let category = Category::new(&category_config.name, &category_config.path);
        println!("\n{} {}", "Silo:".cyan().bold(), category.name);

        let documents = locator.list_documents(&category);

        let mut counts = CategorySummary::new(&category.name);
        counts.documents_found = documents.len();

        if documents.is_empty() {
            println!("  {}", "No PDF files found.".yellow());
            summary.push(counts);
            continue;
        }

        println!("  Found {} PDF files", documents.len());

        let pb = ProgressBar::new(documents.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        for document in &documents {
            pb.set_message(document.filename.clone());

            match rt.block_on(pipeline.ingest_document(document)) {
                Ok(DocumentOutcome::Stored { records }) => {
                    counts.processed += 1;
                    counts.records_stored += records;
                }
                Ok(DocumentOutcome::Skipped { reason }) => {
                    pb.println(format!(
                        "  {} {} ({})",
                        "Skipped:".yellow(),
                        document.filename,
                        reason
                    ));
                    counts.skipped += 1;
                }
                Err(e) => {
                    pb.println(format!(
                        "  {} {}: {}",
                        "Failed:".red(),
                        document.filename,
                        e
                    ));
                    counts.failed += 1;
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();

        println!(
            "  {} processed, {} failed, {} skipped, {} records stored",
            counts.processed.to_string().green(),
            counts.failed,
            counts.skipped,
            counts.records_stored
        );

        summary.push(counts);
    }

    println!("\n{}", "Ingestion complete.".green().bold());
    println!(
        "  Documents processed: {}",
        summary.documents_processed().to_string().green()
    );
    if summary.documents_failed() > 0 {
        println!(
            "  Documents failed:    {}",
            summary.documents_failed().to_string().red()
        );
    } else {
        println!("  Documents failed:    0");
    }
    println!("  Documents skipped:   {}", summary.documents_skipped());
    println!("  Records stored:      {}", summary.records_stored());

    Ok(())
}
