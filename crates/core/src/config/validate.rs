use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Places API key is set
/// - max_result_count is within the Places API range (1-20)
/// - Timeouts are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Places validation
    if config.places.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "places.api_key must be set".to_string(),
        ));
    }
    if !(1..=20).contains(&config.places.max_result_count) {
        return Err(ConfigError::ValidationError(format!(
            "places.max_result_count must be between 1 and 20, got {}",
            config.places.max_result_count
        )));
    }
    if config.places.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "places.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Search validation
    if config.search.sub_query_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "search.sub_query_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
