use crate::config::types::{CrawlConfig, FileConfig};
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Values supplied on the command line
///
/// Every field is optional; `None` means the flag was not given and the
/// file value (or default) applies.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub max_cache_mb: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub max_pages: Option<u64>,
}

/// Loads and parses a TOML configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(FileConfig)` - Successfully parsed file
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Resolves the final configuration from file values and CLI overrides
///
/// Precedence, highest first: CLI flag, file value, built-in default. The
/// resolved configuration is validated before it is returned.
pub fn resolve_config(
    file: Option<FileConfig>,
    cli: CliOverrides,
) -> Result<CrawlConfig, ConfigError> {
    let file = file.unwrap_or_default();
    let mut config = CrawlConfig::default();

    if let Some(user_agent) = file.fetch.user_agent {
        config.fetch.user_agent = user_agent;
    }
    if let Some(secs) = file.fetch.request_timeout_secs {
        config.fetch.request_timeout_secs = secs;
    }
    if let Some(secs) = file.fetch.connect_timeout_secs {
        config.fetch.connect_timeout_secs = secs;
    }

    config.limits.concurrency = cli
        .concurrency
        .or(file.limits.concurrency)
        .unwrap_or(config.limits.concurrency);
    config.limits.max_pages = cli
        .max_pages
        .or(file.limits.max_pages)
        .unwrap_or(config.limits.max_pages);

    if let Some(dir) = cli.output_dir.or(file.output.directory) {
        config.output.directory = dir;
    }
    if let Some(mb) = cli.max_cache_mb.or(file.output.max_cache_mb) {
        if mb < 1 {
            return Err(ConfigError::Validation(
                "max-cache-mb must be >= 1".to_string(),
            ));
        }
        config.output.max_cache_bytes = mb * 1024 * 1024;
    }

    validate(&config)?;
    Ok(config)
}

/// Validates the resolved configuration
fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.limits.concurrency < 1 || config.limits.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.limits.concurrency
        )));
    }

    if config.fetch.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.fetch.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.fetch.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
