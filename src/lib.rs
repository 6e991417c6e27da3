//! Norma-Harvest: a regulatory document acquisition pipeline
//!
//! This crate crawls a government document repository breadth-first, downloads
//! every PDF it discovers, extracts the text (with an OCR fallback) and bulk
//! indexes the result into a search service, leaving a statistics report behind.

pub mod config;
pub mod crawler;
pub mod download;
pub mod extract;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Norma-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Search index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Classifies a reqwest failure for the given URL
    pub fn from_request(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            Self::Http {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Missing required setting: {0}")]
    Missing(String),
}

/// Result type alias for Norma-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::RunStatistics;
pub use pipeline::{run_pipeline, Pipeline};
pub use state::{CrawlState, LinkKind, LinkRecord};
pub use url::{extract_domain, LinkScope};
