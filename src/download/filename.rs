use std::collections::HashSet;
use url::Url;

/// Derives the storage file name for a document URL
///
/// Uses the last segment of the URL path when it looks like a file name
/// (non-empty and containing a dot); otherwise falls back to `doc_<index>.pdf`.
///
/// # Examples
///
/// ```
/// use norma_harvest::download::filename_for;
///
/// assert_eq!(filename_for("https://a.gov.co/docs/res-40001.pdf", 1), "res-40001.pdf");
/// assert_eq!(filename_for("https://a.gov.co/docs/download/", 7), "doc_7.pdf");
/// ```
pub fn filename_for(url: &str, index: usize) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| is_usable(name))
        .unwrap_or_else(|| synthetic_name(index))
}

/// Synthetic name used when a URL path yields nothing usable
pub fn synthetic_name(index: usize) -> String {
    format!("doc_{}.pdf", index)
}

/// Makes `name` distinct from every name in `taken`
///
/// Repeats get a numeric suffix before the extension: `res.pdf`, `res_2.pdf`,
/// `res_3.pdf`, and so on.
pub fn unique_name(name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(name) {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    (2..)
        .map(|n| match ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        })
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}

fn is_usable(name: &str) -> bool {
    !name.is_empty()
        && name.contains('.')
        && name != "."
        && name != ".."
        && !name.contains('\\')
}
