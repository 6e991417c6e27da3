//! Extraction backend built on poppler-utils and Tesseract
//!
//! - primary: `pdftotext -layout <file> -`
//! - OCR: `pdftoppm -png -r <dpi>` into a temporary directory, then
//!   `tesseract <page> stdout -l <lang>` for each rendered page

use super::{ExtractError, ExtractResult, TextExtractor};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};
use tempfile::TempDir;

fn handle_output(
    result: std::io::Result<Output>,
    tool: &str,
    error_prefix: &str,
) -> ExtractResult<String> {
    match result {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => Err(ExtractError::ExtractionFailed(format!(
            "{}: {}",
            error_prefix,
            String::from_utf8_lossy(&output.stderr).trim()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractError::ToolNotFound(tool.to_string()))
        }
        Err(e) => Err(ExtractError::Io(e)),
    }
}

fn check_status(
    result: std::io::Result<ExitStatus>,
    tool: &str,
    error_msg: &str,
) -> ExtractResult<()> {
    match result {
        Ok(s) if s.success() => Ok(()),
        Ok(_) => Err(ExtractError::ExtractionFailed(error_msg.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractError::ToolNotFound(tool.to_string()))
        }
        Err(e) => Err(ExtractError::Io(e)),
    }
}

/// Shells out to `pdftotext`, `pdftoppm` and `tesseract`
#[derive(Debug, Clone)]
pub struct PopplerExtractor {
    language: String,
    dpi: u32,
}

impl Default for PopplerExtractor {
    fn default() -> Self {
        Self::new("spa", 300)
    }
}

impl PopplerExtractor {
    pub fn new(language: impl Into<String>, dpi: u32) -> Self {
        Self {
            language: language.into(),
            dpi,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Reports which external tools are on the PATH
    pub fn check_tools() -> Vec<(&'static str, bool)> {
        ["pdftotext", "pdftoppm", "tesseract"]
            .into_iter()
            .map(|tool| {
                let found = Command::new(tool)
                    .arg("-v")
                    .output()
                    .map(|_| true)
                    .unwrap_or(false);
                (tool, found)
            })
            .collect()
    }

    fn render_pages(&self, path: &Path, out_dir: &Path) -> ExtractResult<Vec<PathBuf>> {
        let status = Command::new("pdftoppm")
            .args(["-png", "-r", &self.dpi.to_string()])
            .arg(path)
            .arg(out_dir.join("page"))
            .status();

        check_status(
            status,
            "pdftoppm (install poppler-utils)",
            "pdftoppm failed to render PDF",
        )?;

        let mut images: Vec<_> = std::fs::read_dir(out_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
            .collect();
        images.sort();

        Ok(images)
    }

    fn run_tesseract(&self, image: &Path) -> ExtractResult<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        handle_output(output, "tesseract (install tesseract-ocr)", "tesseract failed")
    }
}

impl TextExtractor for PopplerExtractor {
    fn extract_text(&self, path: &Path) -> ExtractResult<String> {
        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(path)
            .arg("-")
            .output();

        handle_output(output, "pdftotext (install poppler-utils)", "pdftotext failed")
    }

    fn extract_text_ocr(&self, path: &Path) -> ExtractResult<String> {
        let temp_dir = TempDir::new()?;
        let images = self.render_pages(path, temp_dir.path())?;

        if images.is_empty() {
            return Err(ExtractError::ExtractionFailed(
                "no pages rendered from PDF".to_string(),
            ));
        }

        let mut pages = Vec::with_capacity(images.len());
        for (i, image) in images.iter().enumerate() {
            match self.run_tesseract(image) {
                Ok(text) => pages.push(text),
                Err(e @ ExtractError::ToolNotFound(_)) => return Err(e),
                Err(e) => tracing::warn!("OCR failed for page {}: {}", i + 1, e),
            }
        }

        Ok(pages.join("\n\n"))
    }
}
