use super::{IndexableDocument, SearchIndex};

/// Outcome of one batch submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexBatchResult {
    /// False only when the bulk call failed as a whole
    pub success: bool,
    pub indexed: usize,
    pub failed: usize,
    pub failure_details: Vec<String>,

    /// Error of the whole call, if it failed
    pub error: Option<String>,
}

impl IndexBatchResult {
    /// Indexing errors as counted in the run report
    ///
    /// A failed call counts once no matter how many documents it carried.
    pub fn error_count(&self) -> usize {
        if self.success {
            self.failed
        } else {
            1
        }
    }
}

/// Submits extracted documents to a [`SearchIndex`] in a single bulk call
pub struct IndexingCoordinator {
    index: Box<dyn SearchIndex>,
}

impl IndexingCoordinator {
    pub fn new(index: Box<dyn SearchIndex>) -> Self {
        Self { index }
    }

    pub async fn index_batch(
        &self,
        index_name: &str,
        documents: &[IndexableDocument],
    ) -> IndexBatchResult {
        if documents.is_empty() {
            tracing::info!("Nothing to index");
            return IndexBatchResult {
                success: true,
                ..Default::default()
            };
        }

        tracing::info!(
            "Submitting {} documents to index '{}'",
            documents.len(),
            index_name
        );

        match self.index.bulk_index(index_name, documents).await {
            Ok(outcome) => {
                if outcome.failed > 0 {
                    tracing::warn!(
                        "{} of {} documents rejected by the index",
                        outcome.failed,
                        documents.len()
                    );
                    for detail in &outcome.failure_details {
                        tracing::debug!("Rejected: {}", detail);
                    }
                }
                tracing::info!("Indexed {} documents", outcome.indexed);

                IndexBatchResult {
                    success: true,
                    indexed: outcome.indexed,
                    failed: outcome.failed,
                    failure_details: outcome.failure_details,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("Bulk indexing failed: {}", e);
                IndexBatchResult {
                    success: false,
                    indexed: 0,
                    failed: documents.len(),
                    failure_details: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Current document count, or `None` if the service could not be asked
    pub async fn count(&self, index_name: &str) -> Option<u64> {
        match self.index.count(index_name).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!("Could not count documents in '{}': {}", index_name, e);
                None
            }
        }
    }
}
