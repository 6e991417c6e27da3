//! Run statistics
//!
//! One [`RunStatistics`] is produced per run, persisted as JSON (overwriting the
//! previous run's report) and echoed to stdout.

use crate::index::IndexBatchResult;
use crate::output::OutputResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregated counts of one harvest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// When the report was produced
    pub processed_at: DateTime<Utc>,

    /// PDF links discovered by the crawl, before truncation
    pub pdfs_found: usize,

    pub pdfs_downloaded: usize,

    /// Documents with extracted text
    pub pdfs_processed: usize,

    /// Documents the search service accepted in this run
    pub docs_indexed: usize,

    pub download_errors: usize,
    pub extraction_errors: usize,
    pub index_errors: usize,

    /// `pdfs_processed / pdfs_found * 100`, two decimals
    pub success_percentage: f64,

    /// Document count of the index after this run
    ///
    /// Falls back to `docs_indexed` when the service could not be counted.
    #[serde(default)]
    pub docs_in_index: u64,

    #[serde(default)]
    pub config_hash: String,
}

/// Processed over found as a percentage rounded to two decimals
pub fn success_percentage(processed: usize, found: usize) -> f64 {
    if found == 0 {
        return 0.0;
    }
    (processed as f64 / found as f64 * 100.0 * 100.0).round() / 100.0
}

impl RunStatistics {
    /// Aggregates the terminal counts of every stage
    pub fn summarize(
        found: usize,
        downloaded: usize,
        extracted: usize,
        download_errors: usize,
        extraction_errors: usize,
        index: &IndexBatchResult,
    ) -> Self {
        Self {
            processed_at: Utc::now(),
            pdfs_found: found,
            pdfs_downloaded: downloaded,
            pdfs_processed: extracted,
            docs_indexed: index.indexed,
            download_errors,
            extraction_errors,
            index_errors: index.error_count(),
            success_percentage: success_percentage(extracted, found),
            docs_in_index: index.indexed as u64,
            config_hash: String::new(),
        }
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = hash.into();
        self
    }

    pub fn with_docs_in_index(mut self, count: u64) -> Self {
        self.docs_in_index = count;
        self
    }

    pub fn total_errors(&self) -> usize {
        self.download_errors + self.extraction_errors + self.index_errors
    }
}

/// Writes the report as pretty JSON, replacing any previous report
pub fn save_statistics(stats: &RunStatistics, path: &Path) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Reads a persisted report back
pub fn load_statistics(path: &Path) -> OutputResult<RunStatistics> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Run:");
    println!("  Processed at: {}", stats.processed_at.to_rfc3339());
    if !stats.config_hash.is_empty() {
        println!("  Config hash:  {}", stats.config_hash);
    }
    println!();

    println!("Documents:");
    println!("  PDFs found:       {}", stats.pdfs_found);
    println!("  PDFs downloaded:  {}", stats.pdfs_downloaded);
    println!("  PDFs processed:   {}", stats.pdfs_processed);
    println!("  Docs indexed:     {}", stats.docs_indexed);
    println!("  Docs in index:    {}", stats.docs_in_index);
    println!();

    println!("Errors:");
    println!("  Download:   {}", stats.download_errors);
    println!("  Extraction: {}", stats.extraction_errors);
    println!("  Indexing:   {}", stats.index_errors);
    println!();

    println!(
        "Success Rate: {:.2}% ({} / {} documents processed)",
        stats.success_percentage, stats.pdfs_processed, stats.pdfs_found
    );
}
