//! Text extraction stage
//!
//! Each downloaded document gets one primary extraction attempt and, when that
//! yields no text, one OCR attempt. Backends are synchronous and run off the
//! async runtime.

mod orchestrator;
mod poppler;

pub use orchestrator::{
    ExtractionAttempt, ExtractionFailure, ExtractionOrchestrator, ExtractionReport,
    ExtractionResult, NO_TEXT_EXTRACTED,
};
pub use poppler::PopplerExtractor;

use std::path::Path;
use thiserror::Error;

/// Errors raised by an extraction backend
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for extraction backends
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// A text extraction backend
///
/// Both calls are blocking. Returning empty text is a normal outcome, not an
/// error.
pub trait TextExtractor: Send + Sync {
    /// Direct text extraction from the document's text layer
    fn extract_text(&self, path: &Path) -> ExtractResult<String>;

    /// Optical recognition over rendered page images
    fn extract_text_ocr(&self, path: &Path) -> ExtractResult<String>;
}
