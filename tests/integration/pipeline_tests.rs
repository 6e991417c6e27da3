//! Integration tests for a whole harvest run
//!
//! A wiremock server plays both the document repository and the search
//! service. Extraction uses a fake backend that reads a marker from the
//! downloaded bytes, so real files flow through every stage.

use norma_harvest::config::{parse_config, validate, Config};
use norma_harvest::extract::{ExtractResult, TextExtractor};
use norma_harvest::index::ElasticIndex;
use norma_harvest::output::load_statistics;
use norma_harvest::storage::open_storage;
use norma_harvest::Pipeline;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Reads `TEXT:<text>`, `SCAN:<text>` or anything else from the file
///
/// `TEXT` has a text layer, `SCAN` only yields text through OCR, anything else
/// yields nothing at all.
struct MarkerExtractor;

fn read_marker(path: &Path) -> (String, String) {
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match content.split_once(':') {
        Some((kind, text)) => (kind.to_string(), text.to_string()),
        None => (String::new(), String::new()),
    }
}

impl TextExtractor for MarkerExtractor {
    fn extract_text(&self, path: &Path) -> ExtractResult<String> {
        let (kind, text) = read_marker(path);
        Ok(if kind == "TEXT" { text } else { String::new() })
    }

    fn extract_text_ocr(&self, path: &Path) -> ExtractResult<String> {
        let (kind, text) = read_marker(path);
        Ok(if kind == "SCAN" { text } else { String::new() })
    }
}

fn test_config(server: &MockServer, out: &TempDir, max_pdfs: usize) -> Config {
    let toml = format!(
        r#"
[crawler]
seed-url = "{uri}/es/repositorio-normativo/"
target-domain = "127.0.0.1"
max-pdfs = {max_pdfs}
max-pages = 10
page-timeout-secs = 5

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

[download]
timeout-secs = 5
request-delay-ms = 0

[index]
url = "{uri}"
api-key = "secret"
name = "normas-test"
provenance = "Test Repository"

[output]
base-dir = "{out}"
summary-path = "{out}/summary.md"
"#,
        uri = server.uri(),
        max_pdfs = max_pdfs,
        out = out.path().display()
    );

    let config = parse_config(&toml).expect("test config parses");
    validate(&config).expect("test config is valid");
    config
}

fn pipeline(config: Config) -> Pipeline {
    let storage = open_storage(&config.output).expect("storage");
    let index = ElasticIndex::new(
        Client::new(),
        config.index.url.as_deref().unwrap_or_default(),
        "secret",
        Duration::from_secs(5),
    );
    Pipeline::new(
        config,
        Client::new(),
        storage,
        Arc::new(MarkerExtractor),
        Box::new(index),
    )
    .with_config_hash("cafe")
}

async fn mount_page(server: &MockServer, at: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_pdf(server: &MockServer, at: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.as_bytes().to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(server)
        .await;
}

/// Seed links two PDFs (one missing) and a section page with two more PDFs
async fn mount_repository(server: &MockServer) {
    mount_page(
        server,
        "/es/repositorio-normativo/",
        r#"<html><body>
            <a href="/docs/res-1.pdf">Resolución 1</a>
            <a href="/docs/missing.pdf">Perdido</a>
            <a href="/es/repositorio-normativo/decretos/">Decretos</a>
            <a href="/es/sala-de-prensa/">Prensa</a>
            <a href="mailto:normas@example.com">Contacto</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        server,
        "/es/repositorio-normativo/decretos/",
        r#"<a href="/docs/scan-2.pdf">Decreto 2</a>
           <a href="/docs/blank-3.pdf#page=1">Decreto 3</a>"#,
    )
    .await;

    mount_pdf(server, "/docs/res-1.pdf", "TEXT:Resolución 1 del ministerio").await;
    mount_pdf(server, "/docs/scan-2.pdf", "SCAN:Decreto 2 escaneado").await;
    mount_pdf(server, "/docs/blank-3.pdf", "EMPTY").await;
    Mock::given(method("GET"))
        .and(path("/docs/missing.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_produces_report() {
    let server = MockServer::start().await;
    mount_repository(&server).await;

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .and(body_string_contains(r#""nombre_archivo":"res-1.pdf""#))
        .and(body_string_contains(r#""nombre_archivo":"scan-2.pdf""#))
        .and(body_string_contains(r#""fuente":"Test Repository""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": false,
            "items": [
                { "index": { "status": 201 } },
                { "index": { "status": 201 } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/normas-test/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": 12 })))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let pipeline = pipeline(test_config(&server, &out, 10));
    let stats = pipeline.run().await.expect("run completes");

    assert_eq!(stats.pdfs_found, 4);
    assert_eq!(stats.pdfs_downloaded, 3);
    assert_eq!(stats.download_errors, 1);
    assert_eq!(stats.pdfs_processed, 2);
    assert_eq!(stats.extraction_errors, 1);
    assert_eq!(stats.docs_indexed, 2);
    assert_eq!(stats.index_errors, 0);
    assert_eq!(stats.success_percentage, 50.0);
    assert_eq!(stats.docs_in_index, 12);
    assert_eq!(stats.config_hash, "cafe");

    // Downloads landed flat in the PDF directory
    let pdfs = out.path().join("pdfs");
    assert!(pdfs.join("res-1.pdf").is_file());
    assert!(pdfs.join("scan-2.pdf").is_file());
    assert!(pdfs.join("blank-3.pdf").is_file());
    assert!(!pdfs.join("missing.pdf").exists());

    // The persisted report matches what the run returned
    let persisted = load_statistics(&out.path().join("run_statistics.json")).unwrap();
    assert_eq!(persisted, stats);

    let summary = std::fs::read_to_string(out.path().join("summary.md")).unwrap();
    assert!(summary.contains("| Extraction | 2 | 1 |"));
}

#[tokio::test]
async fn test_unreachable_index_counts_one_error() {
    let server = MockServer::start().await;
    mount_repository(&server).await;

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(503).set_body_string("cluster unavailable"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/normas-test/_count"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let stats = pipeline(test_config(&server, &out, 10))
        .run()
        .await
        .expect("run still completes");

    assert_eq!(stats.pdfs_processed, 2);
    assert_eq!(stats.docs_indexed, 0);
    assert_eq!(stats.index_errors, 1);
    assert_eq!(stats.docs_in_index, 0);
    assert!(out.path().join("run_statistics.json").is_file());
}

#[tokio::test]
async fn test_failed_count_falls_back_to_indexed() {
    let server = MockServer::start().await;
    mount_repository(&server).await;

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                { "index": { "status": 201 } },
                { "index": { "status": 201 } }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/normas-test/_count"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let stats = pipeline(test_config(&server, &out, 10)).run().await.unwrap();

    assert_eq!(stats.docs_indexed, 2);
    assert_eq!(stats.index_errors, 0);
    assert_eq!(stats.docs_in_index, 2);

    let persisted = load_statistics(&out.path().join("run_statistics.json")).unwrap();
    assert_eq!(persisted.docs_in_index, 2);
}

#[tokio::test]
async fn test_unreachable_seed_still_reports() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/es/repositorio-normativo/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/normas-test/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": 0 })))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let stats = pipeline(test_config(&server, &out, 10)).run().await.unwrap();

    assert_eq!(stats.pdfs_found, 0);
    assert_eq!(stats.pdfs_downloaded, 0);
    assert_eq!(stats.success_percentage, 0.0);
    assert_eq!(stats.index_errors, 0);
    assert!(out.path().join("run_statistics.json").is_file());
}

#[tokio::test]
async fn test_pdf_limit_truncates_downloads() {
    let server = MockServer::start().await;
    mount_repository(&server).await;

    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [ { "index": { "status": 201 } } ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/normas-test/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "count": 1 })))
        .mount(&server)
        .await;

    let out = TempDir::new().unwrap();
    let stats = pipeline(test_config(&server, &out, 1)).run().await.unwrap();

    // Seed alone already yields two PDFs, so the section page is never explored
    assert_eq!(stats.pdfs_found, 2);
    assert_eq!(stats.pdfs_downloaded + stats.download_errors, 1);
    assert_eq!(stats.pdfs_processed, 1);
    assert_eq!(stats.success_percentage, 50.0);
    assert!(!out.path().join("pdfs/scan-2.pdf").exists());
}
