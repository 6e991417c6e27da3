/// Link record definitions produced by page classification
use std::fmt;

/// Kind of an in-scope link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Link to a PDF document, collected for download
    Pdf,

    /// Link to a navigable repository page, queued for exploration
    Page,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Page => write!(f, "page"),
        }
    }
}

/// One classified anchor from a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Absolute URL, fragment removed
    pub url: String,

    /// Visible anchor text, whitespace-trimmed
    pub anchor_text: String,

    pub kind: LinkKind,
}

impl LinkRecord {
    pub fn new(url: impl Into<String>, anchor_text: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            url: url.into(),
            anchor_text: anchor_text.into(),
            kind,
        }
    }

    pub fn pdf(url: impl Into<String>, anchor_text: impl Into<String>) -> Self {
        Self::new(url, anchor_text, LinkKind::Pdf)
    }

    pub fn page(url: impl Into<String>, anchor_text: impl Into<String>) -> Self {
        Self::new(url, anchor_text, LinkKind::Page)
    }
}
