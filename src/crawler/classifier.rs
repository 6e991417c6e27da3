//! Page-level link classification
//!
//! [`LinkClassifier`] fetches one page and returns its classified links. Any
//! network or parse failure is logged and turned into an empty list, so a bad
//! page never aborts the surrounding crawl.

use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::crawler::parser::classify_html;
use crate::state::LinkRecord;
use crate::url::LinkScope;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Anything that can turn a page URL into classified links
///
/// The frontier only depends on this trait, which keeps the traversal testable
/// against an in-memory page graph.
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// Returns the classified links of one page (empty on any failure)
    async fn classify(&self, page_url: &str) -> Vec<LinkRecord>;
}

/// Fetches pages over HTTP and classifies their anchors
pub struct LinkClassifier {
    client: Client,
    scope: LinkScope,
    timeout: Duration,
}

impl LinkClassifier {
    pub fn new(client: Client, scope: LinkScope, timeout: Duration) -> Self {
        Self {
            client,
            scope,
            timeout,
        }
    }
}

#[async_trait]
impl LinkSource for LinkClassifier {
    async fn classify(&self, page_url: &str) -> Vec<LinkRecord> {
        let base_url = match Url::parse(page_url) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Skipping unparseable page URL {}: {}", page_url, e);
                return Vec::new();
            }
        };

        match fetch_page(&self.client, page_url, self.timeout).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                // Relative links resolve against where the redirect chain ended.
                let base = Url::parse(&final_url).unwrap_or(base_url);
                let links = classify_html(&body, &base, &self.scope);
                tracing::debug!("{} in-scope links on {}", links.len(), page_url);
                links
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} fetching page {}", status_code, page_url);
                Vec::new()
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch page {}: {}", page_url, error);
                Vec::new()
            }
        }
    }
}
