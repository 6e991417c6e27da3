//! Output module for run reports
//!
//! This module handles:
//! - Aggregating stage counts into run statistics
//! - Persisting the statistics report as JSON
//! - Rendering an optional markdown summary

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{
    load_statistics, print_statistics, save_statistics, success_percentage, RunStatistics,
};

use thiserror::Error;

/// Errors that can occur while writing or reading reports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = Result<T, OutputError>;
