//! Elasticsearch client over the `_bulk` and `_count` endpoints

use super::{BulkOutcome, IndexError, IndexResult, IndexableDocument, SearchIndex};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    status: u16,
    #[serde(default)]
    error: Option<BulkItemError>,
}

#[derive(Debug, Deserialize)]
struct BulkItemError {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Search service client authenticated with an API key
pub struct ElasticIndex {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ElasticIndex {
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("ApiKey {}", self.api_key))
            .timeout(self.timeout)
    }

    /// Builds the newline-delimited bulk body: one action line per document
    fn bulk_body(index: &str, documents: &[IndexableDocument]) -> IndexResult<String> {
        let action = serde_json::to_string(&serde_json::json!({ "index": { "_index": index } }))?;
        let mut body = String::new();
        for document in documents {
            body.push_str(&action);
            body.push('\n');
            body.push_str(&serde_json::to_string(document)?);
            body.push('\n');
        }
        Ok(body)
    }

    async fn check_status(response: Response) -> IndexResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(IndexError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchIndex for ElasticIndex {
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[IndexableDocument],
    ) -> IndexResult<BulkOutcome> {
        let body = Self::bulk_body(index, documents)?;

        let response = self
            .authorized(self.client.post(format!("{}/_bulk", self.base_url)))
            .header(CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        let parsed: BulkResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| IndexError::InvalidResponse(e.to_string()))?;

        let mut outcome = BulkOutcome::default();
        for item in parsed.items.iter().flat_map(|entry| entry.values()) {
            if (200..300).contains(&item.status) {
                outcome.indexed += 1;
            } else {
                outcome.failed += 1;
                outcome.failure_details.push(match &item.error {
                    Some(err) => format!("{}: {}", err.kind, err.reason),
                    None => format!("HTTP {}", item.status),
                });
            }
        }

        Ok(outcome)
    }

    async fn count(&self, index: &str) -> IndexResult<u64> {
        let response = self
            .authorized(self.client.get(format!("{}/{}/_count", self.base_url, index)))
            .send()
            .await?;

        let parsed: CountResponse = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| IndexError::InvalidResponse(e.to_string()))?;

        Ok(parsed.count)
    }
}
