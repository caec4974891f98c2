//! Init command - create a default configuration file.

use anyhow::Result;
use colored::Colorize;
use silo_config::Config;
use std::path::Path;

/// Write a commented default config file, refusing to overwrite one.
pub fn run(path: &Path) -> Result<()> {
    if path.exists() {
        println!(
            "{} {} already exists, leaving it untouched.",
            "Note:".yellow(),
            path.display()
        );
        return Ok(());
    }

    Config::create_default_file(path)?;

    println!("{} {}", "Created:".green().bold(), path.display());
    println!("\nNext steps:");
    println!("  1. Add your document silos under {}", "[[categories]]".cyan());
    println!(
        "  2. Put {}, {} and {} in the env file",
        "GEMINI_API_KEY".cyan(),
        "SUPABASE_URL".cyan(),
        "SUPABASE_SERVICE_ROLE_KEY".cyan()
    );
    println!("  3. Run {}", "silo run".cyan());

    Ok(())
}
