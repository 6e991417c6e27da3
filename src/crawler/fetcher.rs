//! HTTP fetcher implementation
//!
//! This module handles the HTTP plumbing shared by the crawl and download stages:
//! - Building one HTTP client with a descriptive user agent
//! - Fetching a page body with a bounded timeout
//! - Classifying transport and status failures

use crate::config::Config;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Outcome of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// Page fetched with a 2xx status
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body
        body: String,
    },

    /// Non-2xx status
    HttpError { status_code: u16 },

    /// Timeout, DNS failure, refused connection, or unreadable body
    NetworkError { error: String },
}

/// Builds the HTTP client used for every request of a run
///
/// Request timeouts are applied per request by the callers, since pages and
/// PDFs use different budgets.
///
/// # Example
///
/// ```no_run
/// use norma_harvest::config::load_config;
/// use norma_harvest::crawler::build_http_client;
/// use std::path::Path;
///
/// let config = load_config(Path::new("harvest.toml")).unwrap();
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent_string())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body
///
/// Never returns an error: every failure is folded into a [`FetchResult`] so the
/// crawl can log it and move on.
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchResult::NetworkError {
                error: HarvestError::from_request(url, e).to_string(),
            }
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: HarvestError::from_request(url, e).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Config {
        parse_config(
            r#"
[crawler]
seed-url = "https://www.minenergia.gov.co/es/repositorio-normativo/"

[index]
url = "http://localhost:9200"
api-key = "k"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repo/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let url = format!("{}/repo/", server.uri());
        match fetch_page(&client, &url, Duration::from_secs(5)).await {
            FetchResult::Success {
                status_code, body, ..
            } => {
                assert_eq!(status_code, 200);
                assert_eq!(body, "<html></html>");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let result = fetch_page(&client, &server.uri(), Duration::from_secs(5)).await;
        assert!(matches!(result, FetchResult::HttpError { status_code: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let result = fetch_page(&client, &server.uri(), Duration::from_millis(200)).await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
