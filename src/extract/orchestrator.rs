use super::TextExtractor;
use crate::download::DownloadedDocument;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Failure reason recorded when neither extractor produced text
pub const NO_TEXT_EXTRACTED: &str = "no_text_extracted";

/// Outcome of the two-step extraction of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionAttempt {
    /// The primary extractor returned non-blank text
    PrimarySucceeded(String),

    /// The primary result was blank and OCR returned non-blank text
    FallbackSucceeded(String),

    /// Both attempts yielded blank text or errored
    BothFailed,
}

impl ExtractionAttempt {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::PrimarySucceeded(text) | Self::FallbackSucceeded(text) => Some(text),
            Self::BothFailed => None,
        }
    }

    pub fn used_ocr(&self) -> bool {
        !matches!(self, Self::PrimarySucceeded(_))
    }
}

/// A document with extracted text
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub document: DownloadedDocument,
    pub text: String,
    pub succeeded: bool,
}

/// A document no extractor could read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub filename: String,
    pub file_path: PathBuf,
    pub reason: String,
}

/// Verdicts for a batch of documents
///
/// Every input document lands in exactly one of the two lists.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    pub results: Vec<ExtractionResult>,
    pub failed: Vec<ExtractionFailure>,
}

/// Runs the primary extractor with an OCR fallback over downloaded documents
#[derive(Clone)]
pub struct ExtractionOrchestrator {
    extractor: Arc<dyn TextExtractor>,
}

impl ExtractionOrchestrator {
    pub fn new(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    /// Extracts one file, falling back to OCR when the primary text is blank
    pub fn attempt(&self, path: &Path) -> ExtractionAttempt {
        let primary = self.extractor.extract_text(path).unwrap_or_else(|e| {
            tracing::warn!("Primary extraction failed for {}: {}", path.display(), e);
            String::new()
        });

        if !primary.trim().is_empty() {
            return ExtractionAttempt::PrimarySucceeded(primary);
        }

        tracing::info!("No text layer in {}, trying OCR", path.display());

        match self.extractor.extract_text_ocr(path) {
            Ok(text) if !text.trim().is_empty() => ExtractionAttempt::FallbackSucceeded(text),
            Ok(_) => ExtractionAttempt::BothFailed,
            Err(e) => {
                tracing::warn!("OCR failed for {}: {}", path.display(), e);
                ExtractionAttempt::BothFailed
            }
        }
    }

    /// Processes every document; blocking, call from a blocking context
    pub fn process_all(&self, documents: Vec<DownloadedDocument>) -> ExtractionReport {
        let mut report = ExtractionReport::default();
        let total = documents.len();

        for (i, document) in documents.into_iter().enumerate() {
            let attempt = self.attempt(&document.file_path);
            let used_ocr = attempt.used_ocr();

            match attempt {
                ExtractionAttempt::PrimarySucceeded(text)
                | ExtractionAttempt::FallbackSucceeded(text) => {
                    tracing::info!(
                        "[{}/{}] Extracted {} chars from {}{}",
                        i + 1,
                        total,
                        text.chars().count(),
                        document.filename,
                        if used_ocr { " (OCR)" } else { "" }
                    );
                    report.results.push(ExtractionResult {
                        document,
                        text,
                        succeeded: true,
                    });
                }
                ExtractionAttempt::BothFailed => {
                    tracing::warn!("[{}/{}] No text extracted from {}", i + 1, total, document.filename);
                    report.failed.push(ExtractionFailure {
                        filename: document.filename,
                        file_path: document.file_path,
                        reason: NO_TEXT_EXTRACTED.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Extraction finished: {} with text, {} failed",
            report.results.len(),
            report.failed.len()
        );

        report
    }
}
