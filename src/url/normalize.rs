use url::Url;

/// Resolves an anchor `href` against the page it appears on
///
/// Returns `None` when the link should be dropped before classification:
/// - empty hrefs and same-page anchors (`#...`)
/// - `mailto:`, `tel:`, `javascript:` and `data:` links
/// - hrefs that do not resolve to an HTTP(S) URL
///
/// The returned URL never carries a fragment.
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("javascript:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    strip_fragment(&mut absolute);
    Some(absolute)
}

/// Removes the fragment (everything after `#`) from a URL
pub fn strip_fragment(url: &mut Url) {
    url.set_fragment(None);
}
