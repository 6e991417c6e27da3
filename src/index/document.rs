use crate::extract::ExtractionResult;
use serde::{Deserialize, Serialize};

/// Wire shape of one document in the search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexableDocument {
    #[serde(rename = "nombre_archivo")]
    pub filename: String,

    /// Download date, `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "texto")]
    pub text: String,

    pub size_kb: f64,

    #[serde(rename = "url")]
    pub source_url: String,

    #[serde(rename = "fuente")]
    pub provenance: String,
}

impl IndexableDocument {
    pub fn from_extraction(result: &ExtractionResult, provenance: &str) -> Self {
        let document = &result.document;
        Self {
            filename: document.filename.clone(),
            date: document.downloaded_at.format("%Y-%m-%d").to_string(),
            text: result.text.clone(),
            size_kb: size_kb(document.size_bytes),
            source_url: document.source_url.clone(),
            provenance: provenance.to_string(),
        }
    }
}

/// Kilobytes rounded to two decimals
fn size_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}
