//! HTML parser for extracting and classifying anchors
//!
//! Every `<a href>` on the page is resolved against the page URL, stripped of its
//! fragment and run through the [`LinkScope`]. Only PDF links and navigable
//! repository pages survive.

use crate::state::LinkRecord;
use crate::url::{resolve_href, LinkScope};
use scraper::{Html, Selector};
use url::Url;

/// Parses HTML content and classifies its anchors
///
/// # Link Rules
///
/// **Dropped:**
/// - `mailto:`, `tel:`, `javascript:` and `data:` links
/// - same-page anchors
/// - links outside the target domain
/// - in-domain links that are neither PDFs nor repository pages
///
/// Document order is preserved, and so are duplicates: the caller decides what
/// to do with a PDF linked twice.
///
/// # Example
///
/// ```
/// use norma_harvest::crawler::classify_html;
/// use norma_harvest::url::LinkScope;
/// use norma_harvest::LinkKind;
/// use url::Url;
///
/// let html = r#"<a href="/docs/res-1.pdf">Resolución 1</a><a href="/es/noticias">News</a>"#;
/// let base = Url::parse("https://www.minenergia.gov.co/es/repositorio-normativo/").unwrap();
/// let scope = LinkScope::new("minenergia.gov.co", "/repositorio-normativo/");
///
/// let links = classify_html(html, &base, &scope);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].kind, LinkKind::Pdf);
/// ```
pub fn classify_html(html: &str, base_url: &Url, scope: &LinkScope) -> Vec<LinkRecord> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(absolute) = resolve_href(href, base_url) else {
            continue;
        };

        let Some(kind) = scope.classify(&absolute) else {
            tracing::trace!("Dropping out-of-scope link {}", absolute);
            continue;
        };

        let anchor_text = element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        links.push(LinkRecord::new(absolute.to_string(), anchor_text, kind));
    }

    links
}
