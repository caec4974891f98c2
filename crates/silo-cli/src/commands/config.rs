//! Config command implementations.

use anyhow::{Context, Result};
use colored::Colorize;
use silo_config::Config;
use std::path::Path;

/// Show the resolved configuration.
pub fn show(path: &Path) -> Result<()> {
    let config = Config::load_from(path).context("Failed to load configuration")?;

    if !path.exists() {
        println!(
            "{} {} not found, showing defaults. Run {} to create it.",
            "Note:".yellow(),
            path.display(),
            "silo init".cyan()
        );
        println!();
    }

    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("{}", rendered);

    if config.categories.is_empty() {
        println!(
            "{} No categories configured; an ingestion run would do nothing.",
            "Note:".yellow()
        );
    }

    Ok(())
}
