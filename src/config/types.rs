use serde::Deserialize;

/// Main configuration structure for Norma-Harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl seed, scope and limits
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Page the breadth-first traversal starts from
    #[serde(default)]
    pub seed_url: String,

    /// Domain links must belong to (defaults to the seed's host, minus `www.`)
    #[serde(default)]
    pub target_domain: Option<String>,

    /// Path fragment identifying navigable repository pages
    #[serde(default = "default_section_marker")]
    pub section_marker: String,

    /// Maximum number of PDF links to collect
    #[serde(default = "default_max_pdfs")]
    pub max_pdfs: usize,

    /// Maximum number of pages to explore
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Timeout for a single page fetch (seconds)
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Email address for crawler-related contact
    pub contact_email: String,
}

/// Download stage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DownloadConfig {
    /// Timeout for a single PDF download (seconds)
    #[serde(default = "default_download_timeout")]
    pub timeout_secs: u64,

    /// Politeness delay between consecutive downloads (milliseconds)
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,
}

/// Text extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtractionConfig {
    /// Tesseract language code used by the OCR fallback
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Resolution used when rasterizing pages for OCR
    #[serde(default = "default_ocr_dpi")]
    pub ocr_dpi: u32,
}

/// Search index service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexConfig {
    /// Base URL of the search service (overridden by `ELASTIC_URL`)
    #[serde(default)]
    pub url: Option<String>,

    /// API key sent as `Authorization: ApiKey ...` (overridden by `ELASTIC_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Target index name
    #[serde(default = "default_index_name")]
    pub name: String,

    /// Provenance tag stored on every indexed document
    #[serde(default = "default_provenance")]
    pub provenance: String,

    /// Timeout for bulk and count requests (seconds)
    #[serde(default = "default_index_timeout")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Base directory holding downloaded PDFs and the statistics file
    #[serde(default = "default_base_dir")]
    pub base_dir: String,

    /// Subdirectory (under `base-dir`) for downloaded PDFs
    #[serde(default = "default_pdfs_subdir")]
    pub pdfs_subdir: String,

    /// File name (under `base-dir`) of the JSON statistics report
    #[serde(default = "default_stats_file")]
    pub stats_file: String,

    /// Optional path of a markdown rendering of the report
    #[serde(default)]
    pub summary_path: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "NormaHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.org/norma-harvest".to_string(),
            contact_email: "admin@example.org".to_string(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            target_domain: None,
            section_marker: default_section_marker(),
            max_pdfs: default_max_pdfs(),
            max_pages: default_max_pages(),
            page_timeout_secs: default_page_timeout(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            name: default_index_name(),
            provenance: default_provenance(),
            timeout_secs: default_index_timeout(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_download_timeout(),
            request_delay_ms: default_request_delay(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_language: default_ocr_language(),
            ocr_dpi: default_ocr_dpi(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            pdfs_subdir: default_pdfs_subdir(),
            stats_file: default_stats_file(),
            summary_path: None,
        }
    }
}

fn default_section_marker() -> String {
    "/repositorio-normativo/".to_string()
}

fn default_max_pdfs() -> usize {
    200
}

fn default_max_pages() -> usize {
    100
}

fn default_page_timeout() -> u64 {
    15
}

fn default_download_timeout() -> u64 {
    20
}

fn default_request_delay() -> u64 {
    500
}

fn default_ocr_language() -> String {
    "spa".to_string()
}

fn default_ocr_dpi() -> u32 {
    300
}

fn default_index_name() -> String {
    "minminas-normatividad".to_string()
}

fn default_provenance() -> String {
    "Minenergia - Repositorio Normativo".to_string()
}

fn default_index_timeout() -> u64 {
    60
}

fn default_base_dir() -> String {
    "./harvest".to_string()
}

fn default_pdfs_subdir() -> String {
    "pdfs".to_string()
}

fn default_stats_file() -> String {
    "run_statistics.json".to_string()
}

impl Config {
    /// Domain that discovered links must belong to
    ///
    /// Falls back to the seed URL's host with any leading `www.` removed, so that
    /// both `www.example.gov` and `example.gov` stay in scope.
    pub fn target_domain(&self) -> Option<String> {
        if let Some(domain) = &self.crawler.target_domain {
            return Some(domain.to_lowercase());
        }

        url::Url::parse(&self.crawler.seed_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .map(|h| h.strip_prefix("www.").map(str::to_string).unwrap_or(h))
    }

    /// Formats the User-Agent header value
    pub fn user_agent_string(&self) -> String {
        let ua = &self.user_agent;
        format!(
            "{}/{} (+{}; {})",
            ua.crawler_name, ua.crawler_version, ua.contact_url, ua.contact_email
        )
    }
}
