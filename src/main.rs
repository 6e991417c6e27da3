//! Norma-Harvest main entry point
//!
//! This is the command-line interface for the regulatory document harvester.

use anyhow::Context;
use clap::Parser;
use norma_harvest::config::{
    load_config_with_hash, load_output_config, validate, Config, OutputConfig,
};
use norma_harvest::output::{load_statistics, print_statistics};
use norma_harvest::run_pipeline;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Norma-Harvest: a regulatory document harvester
///
/// Norma-Harvest crawls a government document repository breadth-first,
/// downloads the PDFs it finds, extracts their text (falling back to OCR for
/// scanned documents) and bulk indexes them into a search service.
#[derive(Parser, Debug)]
#[command(name = "norma-harvest")]
#[command(version)]
#[command(about = "A regulatory document harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the effective settings without harvesting
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show the statistics report of the last run and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Override the maximum number of PDFs to collect
    #[arg(long, value_name = "N")]
    max_pdfs: Option<usize>,

    /// Override the maximum number of pages to explore
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Credentials may live in a .env file next to the config
    dotenvy::dotenv().ok();

    setup_logging(cli.verbose, cli.quiet);

    if cli.stats {
        let output = load_output_config(&cli.config)
            .with_context(|| format!("invalid configuration {}", cli.config.display()))?;
        return handle_stats(&output);
    }

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("invalid configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(max_pdfs) = cli.max_pdfs {
        config.crawler.max_pdfs = max_pdfs;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    validate(&config).context("invalid command line override")?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_harvest(config, config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("norma_harvest=info,warn"),
            1 => EnvFilter::new("norma_harvest=debug,info"),
            2 => EnvFilter::new("norma_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config) {
    println!("=== Norma-Harvest Dry Run ===\n");

    println!("Crawler:");
    println!("  Seed URL: {}", config.crawler.seed_url);
    println!(
        "  Target domain: {}",
        config.target_domain().unwrap_or_default()
    );
    println!("  Section marker: {}", config.crawler.section_marker);
    println!("  Max PDFs: {}", config.crawler.max_pdfs);
    println!("  Max pages: {}", config.crawler.max_pages);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent_string());

    println!("\nDownload:");
    println!("  Timeout: {}s", config.download.timeout_secs);
    println!("  Delay between requests: {}ms", config.download.request_delay_ms);

    println!("\nExtraction:");
    println!("  OCR language: {}", config.extraction.ocr_language);
    println!("  OCR resolution: {} dpi", config.extraction.ocr_dpi);

    println!("\nIndex:");
    println!("  URL: {}", config.index.url.as_deref().unwrap_or("-"));
    println!("  Index name: {}", config.index.name);
    println!("  Provenance: {}", config.index.provenance);

    println!("\nOutput:");
    println!("  Base directory: {}", config.output.base_dir);
    println!("  Statistics: {}", stats_path(&config.output).display());
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: prints the last persisted report
fn handle_stats(output: &OutputConfig) -> anyhow::Result<()> {
    let path = stats_path(output);
    println!("Report: {}\n", path.display());

    let stats = load_statistics(&path)
        .with_context(|| format!("no readable report at {}", path.display()))?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main harvest run
async fn handle_harvest(config: Config, config_hash: String) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting up to {} PDFs across at most {} pages",
        config.crawler.max_pdfs,
        config.crawler.max_pages
    );

    match run_pipeline(config, config_hash).await {
        Ok(stats) => {
            tracing::info!("Harvest completed");
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

fn stats_path(output: &OutputConfig) -> PathBuf {
    Path::new(&output.base_dir).join(&output.stats_file)
}
