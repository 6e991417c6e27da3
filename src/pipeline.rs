//! End-to-end harvest run
//!
//! Stages run strictly one after another: crawl, download, extract, index, then
//! the report. Per-item failures are counted, never propagated; only setup
//! problems and failing to persist the report abort a run.

use crate::config::Config;
use crate::crawler::{build_http_client, crawl};
use crate::download::{DocumentDownloader, DownloadSettings};
use crate::extract::{ExtractionOrchestrator, PopplerExtractor, TextExtractor};
use crate::index::{ElasticIndex, IndexableDocument, IndexingCoordinator, SearchIndex};
use crate::output::{generate_markdown_summary, save_statistics, RunStatistics};
use crate::storage::{open_storage, StorageLayout};
use crate::{ConfigError, HarvestError};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// One configured harvest run
pub struct Pipeline {
    config: Config,
    client: Client,
    storage: StorageLayout,
    extraction: ExtractionOrchestrator,
    indexing: IndexingCoordinator,
    config_hash: String,
}

impl Pipeline {
    pub fn new(
        config: Config,
        client: Client,
        storage: StorageLayout,
        extractor: Arc<dyn TextExtractor>,
        index: Box<dyn SearchIndex>,
    ) -> Self {
        Self {
            config,
            client,
            storage,
            extraction: ExtractionOrchestrator::new(extractor),
            indexing: IndexingCoordinator::new(index),
            config_hash: String::new(),
        }
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = hash.into();
        self
    }

    /// Runs every stage and persists the statistics report
    pub async fn run(&self) -> Result<RunStatistics, HarvestError> {
        tracing::info!("Crawling from {}", self.config.crawler.seed_url);
        let discovered = crawl(&self.config, self.client.clone()).await?;

        tracing::info!("Downloading {} PDFs", discovered.pdfs.len());
        let downloader = DocumentDownloader::new(
            self.client.clone(),
            self.storage.clone(),
            DownloadSettings {
                timeout: Duration::from_secs(self.config.download.timeout_secs),
                request_delay: Duration::from_millis(self.config.download.request_delay_ms),
            },
        );
        let downloads = downloader.download_all(&discovered.pdfs).await;

        let downloaded = downloads.downloaded.len();
        let download_errors = downloads.failed.len();

        tracing::info!("Extracting text from {} documents", downloaded);
        let extraction = self.extraction.clone();
        let documents = downloads.downloaded;
        let extracted =
            tokio::task::spawn_blocking(move || extraction.process_all(documents)).await?;

        let batch: Vec<IndexableDocument> = extracted
            .results
            .iter()
            .map(|r| IndexableDocument::from_extraction(r, &self.config.index.provenance))
            .collect();

        let index_name = &self.config.index.name;
        let indexed = self.indexing.index_batch(index_name, &batch).await;
        let docs_in_index = self
            .indexing
            .count(index_name)
            .await
            .unwrap_or(indexed.indexed as u64);

        let stats = RunStatistics::summarize(
            discovered.pdfs_discovered,
            downloaded,
            extracted.results.len(),
            download_errors,
            extracted.failed.len(),
            &indexed,
        )
        .with_config_hash(self.config_hash.clone())
        .with_docs_in_index(docs_in_index);

        save_statistics(&stats, self.storage.stats_path())?;
        tracing::info!(
            "Statistics written to {}",
            self.storage.stats_path().display()
        );

        if let Some(summary_path) = &self.config.output.summary_path {
            match generate_markdown_summary(&stats, Path::new(summary_path)) {
                Ok(()) => tracing::info!("Summary written to {}", summary_path),
                Err(e) => tracing::warn!("Could not write summary {}: {}", summary_path, e),
            }
        }

        Ok(stats)
    }
}

/// Builds the production components from configuration and runs once
pub async fn run_pipeline(
    config: Config,
    config_hash: String,
) -> Result<RunStatistics, HarvestError> {
    let index_url = config
        .index
        .url
        .clone()
        .ok_or_else(|| ConfigError::Missing("index.url".to_string()))?;
    let api_key = config
        .index
        .api_key
        .clone()
        .ok_or_else(|| ConfigError::Missing("index.api-key".to_string()))?;

    let client = build_http_client(&config)?;
    let storage = open_storage(&config.output)?;

    let extractor = PopplerExtractor::new(
        config.extraction.ocr_language.clone(),
        config.extraction.ocr_dpi,
    );
    for (tool, found) in PopplerExtractor::check_tools() {
        if !found {
            tracing::warn!("{} not found on PATH, extraction will fail", tool);
        }
    }

    let index = ElasticIndex::new(
        client.clone(),
        &index_url,
        api_key,
        Duration::from_secs(config.index.timeout_secs),
    );

    let pipeline = Pipeline::new(config, client, storage, Arc::new(extractor), Box::new(index))
        .with_config_hash(config_hash);
    pipeline.run().await
}
