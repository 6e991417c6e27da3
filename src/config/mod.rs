//! Configuration module for Norma-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! including environment overrides for the search service endpoint and credentials.
//!
//! # Example
//!
//! ```no_run
//! use norma_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Collecting at most {} PDFs", config.crawler.max_pdfs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DownloadConfig, ExtractionConfig, IndexConfig, OutputConfig,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash,
    load_output_config, parse_config, ENV_INDEX_API_KEY, ENV_INDEX_URL,
};
pub use validation::validate;
