//! Crawler module for repository discovery
//!
//! This module contains the discovery half of the pipeline:
//! - HTTP fetching with bounded timeouts
//! - HTML parsing and link classification
//! - The breadth-first frontier bounded by PDF and page limits

mod classifier;
mod fetcher;
mod frontier;
mod parser;

pub use classifier::{LinkClassifier, LinkSource};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use frontier::{CrawlFrontier, CrawlOutcome};
pub use parser::classify_html;

use crate::config::Config;
use crate::state::CrawlLimits;
use crate::url::LinkScope;
use crate::ConfigError;
use reqwest::Client;
use std::time::Duration;

/// Crawls the configured repository and returns the discovered PDF links
///
/// # Arguments
///
/// * `config` - The harvest configuration
/// * `client` - The shared HTTP client
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Traversal finished (possibly with zero PDFs)
/// * `Err(ConfigError)` - The target domain could not be determined
pub async fn crawl(config: &Config, client: Client) -> Result<CrawlOutcome, ConfigError> {
    let domain = config
        .target_domain()
        .ok_or_else(|| ConfigError::Missing("crawler.target-domain".to_string()))?;

    let classifier = LinkClassifier::new(
        client,
        LinkScope::new(domain, &config.crawler.section_marker),
        Duration::from_secs(config.crawler.page_timeout_secs),
    );

    let limits = CrawlLimits {
        max_pdfs: config.crawler.max_pdfs,
        max_pages: config.crawler.max_pages,
    };

    Ok(CrawlFrontier::new(&config.crawler.seed_url, limits)
        .run(&classifier)
        .await)
}
