use crate::config::types::{Config, OutputConfig};
use crate::config::validation::{validate, validate_output_config};
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable overriding `index.url`
pub const ENV_INDEX_URL: &str = "ELASTIC_URL";

/// Environment variable overriding `index.api-key`
pub const ENV_INDEX_API_KEY: &str = "ELASTIC_API_KEY";

/// Loads and parses a configuration file from the given path
///
/// Values from `ELASTIC_URL` / `ELASTIC_API_KEY` in the process environment take
/// precedence over the file. Callers that want `.env` support should load it
/// (e.g. with `dotenvy`) before calling this.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Loads only the output paths of a configuration file
///
/// Nothing outside `[output]` is validated, so reading the report of an earlier
/// run works without search service credentials.
pub fn load_output_config(path: &Path) -> Result<OutputConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    validate_output_config(&config.output)?;
    Ok(config.output)
}

/// Parses TOML content without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Applies search service overrides using the given variable lookup
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_INDEX_URL) {
        tracing::debug!("Using {} from environment", ENV_INDEX_URL);
        config.index.url = Some(url);
    }
    if let Some(key) = non_empty(ENV_INDEX_API_KEY) {
        tracing::debug!("Using {} from environment", ENV_INDEX_API_KEY);
        config.index.api_key = Some(key);
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Stored in the run report so that two reports can be traced back to the
/// configuration that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
