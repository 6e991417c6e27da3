use crate::config::types::{Config, CrawlerConfig, IndexConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Any error here is fatal: the pipeline refuses to start rather than attempt a
/// partial run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    match config.target_domain() {
        Some(domain) => validate_domain_string(&domain)?,
        None => {
            return Err(ConfigError::Missing(
                "crawler.target-domain (could not derive it from the seed URL)".to_string(),
            ))
        }
    }
    validate_user_agent_config(&config.user_agent)?;
    validate_index_config(&config.index)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seed_url.trim().is_empty() {
        return Err(ConfigError::Missing("crawler.seed-url".to_string()));
    }

    let seed = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTP or HTTPS",
            config.seed_url
        )));
    }

    if config.max_pdfs < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pdfs must be >= 1, got {}",
            config.max_pdfs
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.page_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "page_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.section_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "section_marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates search index configuration, including credentials
fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    let url = config
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing("index.url (or ELASTIC_URL)".to_string()))?;

    Url::parse(url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid index url '{}': {}", url, e)))?;

    if config
        .api_key
        .as_deref()
        .map_or(true, |k| k.trim().is_empty())
    {
        return Err(ConfigError::Missing(
            "index.api-key (or ELASTIC_API_KEY)".to_string(),
        ));
    }

    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "index name cannot be empty".to_string(),
        ));
    }

    if config.name.chars().any(|c| c.is_uppercase() || c == ' ') {
        return Err(ConfigError::Validation(format!(
            "index name must be lowercase without spaces, got '{}'",
            config.name
        )));
    }

    Ok(())
}

/// Validates output configuration
pub(crate) fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.base_dir.is_empty() {
        return Err(ConfigError::Validation(
            "base_dir cannot be empty".to_string(),
        ));
    }

    if config.pdfs_subdir.is_empty() {
        return Err(ConfigError::Validation(
            "pdfs_subdir cannot be empty".to_string(),
        ));
    }

    if config.stats_file.is_empty() {
        return Err(ConfigError::Validation(
            "stats_file cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a domain string
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn valid_config() -> Config {
        parse_config(
            r#"
[crawler]
seed-url = "https://www.minenergia.gov.co/es/repositorio-normativo/normativa/"

[index]
url = "http://localhost:9200"
api-key = "secret"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut config = valid_config();
        config.index.api_key = None;
        assert!(matches!(validate(&config), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_missing_index_url_rejected() {
        let mut config = valid_config();
        config.index.url = None;
        assert!(matches!(validate(&config), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_non_http_seed_rejected() {
        let mut config = valid_config();
        config.crawler.seed_url = "ftp://minenergia.gov.co/normas".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = valid_config();
        config.crawler.max_pdfs = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.crawler.max_pages = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_uppercase_index_name_rejected() {
        let mut config = valid_config();
        config.index.name = "Normas".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_domain_string() {
        assert!(validate_domain_string("minenergia.gov.co").is_ok());
        assert!(validate_domain_string("127.0.0.1").is_ok());

        assert!(validate_domain_string("").is_err());
        assert!(validate_domain_string(".gov.co").is_err());
        assert!(validate_domain_string("gov..co").is_err());
        assert!(validate_domain_string("bad domain.co").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
