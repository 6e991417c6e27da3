//! Search index stage
//!
//! Successfully extracted documents are submitted to the search service in a
//! single bulk call. Per-item rejections are reported as counts; a failure of
//! the call as a whole fails the entire batch.

mod coordinator;
mod document;
mod elastic;

pub use coordinator::{IndexBatchResult, IndexingCoordinator};
pub use document::IndexableDocument;
pub use elastic::ElasticIndex;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the search service client
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Search service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected search service response: {0}")]
    InvalidResponse(String),

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for search service operations
pub type IndexResult<T> = std::result::Result<T, IndexError>;

/// Per-item outcome of one bulk submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub indexed: usize,
    pub failed: usize,
    pub failure_details: Vec<String>,
}

/// A search service that accepts bulk submissions
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Submits all documents in one request
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[IndexableDocument],
    ) -> IndexResult<BulkOutcome>;

    /// Number of documents currently stored in the index
    async fn count(&self, index: &str) -> IndexResult<u64>;
}
