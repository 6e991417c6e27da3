//! URL handling module for Norma-Harvest
//!
//! This module provides href resolution, domain extraction and matching, and the
//! [`LinkScope`] used to decide whether a discovered link is a PDF, a navigable
//! repository page, or out of scope.

mod domain;
mod matcher;
mod normalize;

use crate::state::LinkKind;
use url::Url;

// Re-export main functions
pub use domain::extract_domain;
pub use matcher::matches_domain;
pub use normalize::{resolve_href, strip_fragment};

/// The part of the web a crawl is allowed to touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkScope {
    /// Lowercase target domain (subdomains included)
    pub domain: String,

    /// Lowercase path fragment identifying navigable repository pages
    pub section_marker: String,
}

impl LinkScope {
    /// Creates a new scope, lower-casing both parts
    pub fn new(domain: impl Into<String>, section_marker: impl Into<String>) -> Self {
        Self {
            domain: domain.into().to_lowercase(),
            section_marker: section_marker.into().to_lowercase(),
        }
    }

    /// Classifies an absolute URL against this scope
    ///
    /// Classification rules, in order:
    /// 1. A host outside the target domain is dropped
    /// 2. A path containing `.pdf` (case-insensitive) is a PDF
    /// 3. A path containing the section marker is a navigable page
    /// 4. Everything else is dropped
    ///
    /// # Examples
    ///
    /// ```
    /// use norma_harvest::url::LinkScope;
    /// use norma_harvest::LinkKind;
    /// use url::Url;
    ///
    /// let scope = LinkScope::new("minenergia.gov.co", "/repositorio-normativo/");
    /// let pdf = Url::parse("https://www.minenergia.gov.co/documents/Res-40001.PDF").unwrap();
    /// assert_eq!(scope.classify(&pdf), Some(LinkKind::Pdf));
    /// ```
    pub fn classify(&self, url: &Url) -> Option<LinkKind> {
        let host = extract_domain(url)?;
        if !matches_domain(&self.domain, &host) {
            return None;
        }

        let path = url.path().to_lowercase();
        if path.contains(".pdf") {
            Some(LinkKind::Pdf)
        } else if path.contains(&self.section_marker) {
            Some(LinkKind::Page)
        } else {
            None
        }
    }
}
