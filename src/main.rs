//! arxiv-papers - find arXiv papers by the people you follow
//!
//! ## Usage
//!
//! ```bash
//! arxiv-papers --start 2025-01-28 --end 2025-03-20 --config config.toml
//! ```
//!
//! Writes `papers_<start>_<end>.csv` to the output directory.

use anyhow::{Context, Result};
use arxiv_papers::{
    arxiv::{ArxivClient, ClientOptions},
    config::{self, DEFAULT_CONFIG_FILE},
    models::Configuration,
    pipeline,
};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Query arXiv for papers by a list of people and export them to CSV
#[derive(Parser)]
#[command(name = "arxiv-papers")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Start date (inclusive), YYYY-MM-DD
    #[arg(long)]
    start: NaiveDate,

    /// End date (exclusive), YYYY-MM-DD
    #[arg(long)]
    end: NaiveDate,

    /// Configuration file listing categories and authors
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let category_queries = config::load_category_queries(&cli.config)
        .context("Failed to load configuration")?;

    if cli.end <= cli.start {
        warn!(start = %cli.start, end = %cli.end, "End date is not after start date; expecting no papers");
    }

    let config = Configuration::new(category_queries, cli.start, cli.end);
    let client = ArxivClient::new(ClientOptions::default())?;

    let (out, count) = pipeline::export_papers(&client, &config, &cli.output)
        .await
        .map_err(|e| {
            let context = if e.is_remote() { "arXiv query failed" } else { "Failed to write CSV" };
            anyhow::Error::new(e).context(context)
        })?;

    println!("Saved {} papers to {}", count, out.display());
    Ok(())
}
