//! Document download stage
//!
//! Streams every discovered PDF to local storage, one request at a time with a
//! fixed politeness delay between requests. A failing item is recorded and
//! skipped; it never stops the rest of the batch.

mod filename;

pub use filename::{filename_for, synthetic_name, unique_name};

use crate::state::LinkRecord;
use crate::storage::StorageLayout;
use crate::HarvestError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// A document successfully written to storage
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedDocument {
    pub filename: String,
    pub file_path: PathBuf,
    pub source_url: String,
    /// Size of the written file (not the Content-Length header)
    pub size_bytes: u64,
    pub downloaded_at: DateTime<Utc>,
}

/// A document that could not be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub url: String,
    pub error: String,
}

/// Result of a download batch
///
/// `downloaded.len() + failed.len()` always equals the number of links given.
#[derive(Debug, Clone, Default)]
pub struct DownloadReport {
    pub downloaded: Vec<DownloadedDocument>,
    pub failed: Vec<DownloadFailure>,
}

/// Downloader settings
#[derive(Debug, Clone, Copy)]
pub struct DownloadSettings {
    /// Per-request timeout
    pub timeout: Duration,

    /// Pause between consecutive requests
    pub request_delay: Duration,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            request_delay: Duration::from_millis(500),
        }
    }
}

/// Streams PDFs to the storage layout
pub struct DocumentDownloader {
    client: Client,
    storage: StorageLayout,
    settings: DownloadSettings,
}

impl DocumentDownloader {
    pub fn new(client: Client, storage: StorageLayout, settings: DownloadSettings) -> Self {
        Self {
            client,
            storage,
            settings,
        }
    }

    /// Downloads every link, isolating per-item failures
    ///
    /// File names are unique within the batch, so two URLs ending in the same
    /// segment never overwrite each other.
    pub async fn download_all(&self, links: &[LinkRecord]) -> DownloadReport {
        let mut report = DownloadReport::default();
        let mut taken = HashSet::new();
        let total = links.len();

        for (i, link) in links.iter().enumerate() {
            if i > 0 && !self.settings.request_delay.is_zero() {
                tokio::time::sleep(self.settings.request_delay).await;
            }

            let index = i + 1;
            let filename = unique_name(&filename_for(&link.url, index), &taken);
            match self.download_one(&link.url, filename).await {
                Ok(document) => {
                    taken.insert(document.filename.clone());
                    tracing::info!(
                        "[{}/{}] Downloaded {} ({} bytes)",
                        index,
                        total,
                        document.filename,
                        document.size_bytes
                    );
                    report.downloaded.push(document);
                }
                Err(e) => {
                    tracing::warn!("[{}/{}] Failed to download {}: {}", index, total, link.url, e);
                    report.failed.push(DownloadFailure {
                        url: link.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Download finished: {} succeeded, {} failed",
            report.downloaded.len(),
            report.failed.len()
        );

        report
    }

    /// Streams a single document to disk under `filename`
    pub async fn download_one(
        &self,
        url: &str,
        filename: String,
    ) -> Result<DownloadedDocument, HarvestError> {
        let mut response = self
            .client
            .get(url)
            .timeout(self.settings.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HarvestError::from_request(url, e))?;

        let mut writer = self.storage.create_document(&filename).await?;

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if let Err(e) = writer.write_chunk(&chunk).await {
                        writer.discard().await;
                        return Err(e.into());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    writer.discard().await;
                    return Err(HarvestError::from_request(url, e));
                }
            }
        }

        let (file_path, size_bytes) = writer.finish().await?;

        Ok(DownloadedDocument {
            filename,
            file_path,
            source_url: url.to_string(),
            size_bytes,
            downloaded_at: Utc::now(),
        })
    }
}
