//! Markdown summary generation
//!
//! Renders a [`RunStatistics`] report as a small human-readable document.

use crate::output::{OutputResult, RunStatistics};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown rendering of the report to `output_path`
pub fn generate_markdown_summary(stats: &RunStatistics, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(stats);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_summary(stats: &RunStatistics) -> String {
    let mut md = String::new();

    md.push_str("# Norma-Harvest Run Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Processed**: {}\n",
        stats.processed_at.to_rfc3339()
    ));
    if !stats.config_hash.is_empty() {
        md.push_str(&format!("- **Config Hash**: {}\n", stats.config_hash));
    }
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_percentage
    ));

    md.push_str("## Pipeline\n\n");
    md.push_str("| Stage | Succeeded | Errors |\n");
    md.push_str("|-------|-----------|--------|\n");
    md.push_str(&format!("| Crawl | {} | - |\n", stats.pdfs_found));
    md.push_str(&format!(
        "| Download | {} | {} |\n",
        stats.pdfs_downloaded, stats.download_errors
    ));
    md.push_str(&format!(
        "| Extraction | {} | {} |\n",
        stats.pdfs_processed, stats.extraction_errors
    ));
    md.push_str(&format!(
        "| Indexing | {} | {} |\n\n",
        stats.docs_indexed, stats.index_errors
    ));

    md.push_str(&format!(
        "Documents now in the index: **{}**\n",
        stats.docs_in_index
    ));

    md
}
