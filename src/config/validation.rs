use crate::config::Config;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates a configuration
///
/// # Rules
///
/// - `cache_pages` must be at least 1
/// - `live_page_max` must be at least 1
/// - `listing_url` must parse as an absolute http(s) URL
/// - `port` must be non-zero
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid
/// * `Err(ConfigError)` - A rule was violated
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.source.cache_pages < 1 {
        return Err(ConfigError::Validation(
            "cache-pages must be at least 1".to_string(),
        ));
    }

    if config.source.live_page_max < 1 {
        return Err(ConfigError::Validation(
            "live page range must cover at least one page".to_string(),
        ));
    }

    let url = Url::parse(&config.source.listing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.source.listing_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            url.scheme(),
            config.source.listing_url
        )));
    }

    if config.server.port == 0 {
        return Err(ConfigError::Validation(
            "port must be non-zero".to_string(),
        ));
    }

    Ok(())
}
