use url::Url;

/// Extracts the lowercase host from a URL
///
/// Returns `None` for URLs without a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use norma_harvest::url::extract_domain;
///
/// let url = Url::parse("https://WWW.MinEnergia.gov.co/es/").unwrap();
/// assert_eq!(extract_domain(&url), Some("www.minenergia.gov.co".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
