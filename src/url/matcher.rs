/// Checks whether a host belongs to the target domain
///
/// The domain itself and any of its subdomains match; lookalike hosts that
/// merely end with the same characters do not.
///
/// # Examples
///
/// ```
/// use norma_harvest::url::matches_domain;
///
/// assert!(matches_domain("minenergia.gov.co", "minenergia.gov.co"));
/// assert!(matches_domain("minenergia.gov.co", "www.minenergia.gov.co"));
/// assert!(!matches_domain("minenergia.gov.co", "notminenergia.gov.co"));
/// ```
pub fn matches_domain(domain: &str, host: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}
