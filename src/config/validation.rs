use crate::config::types::{Config, OutputConfig, ProviderConfig, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Provider-side maximum nearby-search radius in meters
pub const MAX_RADIUS_M: u32 = 50_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_provider_config(&config.provider)?;
    validate_search_config(&config.search)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates provider configuration
fn validate_provider_config(config: &ProviderConfig) -> Result<(), ConfigError> {
    if config.api_key.is_empty() {
        return Err(ConfigError::Validation(
            "api_key cannot be empty".to_string(),
        ));
    }

    for (name, endpoint) in [
        ("geocode_endpoint", &config.geocode_endpoint),
        ("nearby_endpoint", &config.nearby_endpoint),
        ("details_endpoint", &config.details_endpoint),
    ] {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", name, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{} must be an http(s) URL, got '{}'",
                name, endpoint
            )));
        }
    }

    if config.region.is_empty() {
        return Err(ConfigError::Validation(
            "region cannot be empty".to_string(),
        ));
    }

    if config.language.is_empty() {
        return Err(ConfigError::Validation(
            "language cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a radius/page-limit pair
///
/// Shared between config validation and CLI overrides, so a command-line
/// `--radius`/`--pages` cannot sidestep the bounds the config enforces.
pub fn validate_search_bounds(radius_m: u32, page_limit: u32) -> Result<(), ConfigError> {
    if radius_m < 1 || radius_m > MAX_RADIUS_M {
        return Err(ConfigError::Validation(format!(
            "radius_m must be between 1 and {}, got {}",
            MAX_RADIUS_M, radius_m
        )));
    }

    if page_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "page_limit must be >= 1, got {}",
            page_limit
        )));
    }

    Ok(())
}

/// Validates search configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    validate_search_bounds(config.radius_m, config.page_limit)?;

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    if config.quota_path.is_empty() {
        return Err(ConfigError::Validation(
            "quota_path cannot be empty".to_string(),
        ));
    }

    if config.daily_search_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "daily_search_limit must be >= 1, got {}",
            config.daily_search_limit
        )));
    }

    Ok(())
}
