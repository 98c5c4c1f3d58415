use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Storage key is not empty, quota (if set) is positive
/// - Page size and page window are at least 1
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.storage.key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.key cannot be empty".to_string(),
        ));
    }

    if config.storage.quota_bytes == Some(0) {
        return Err(ConfigError::ValidationError(
            "storage.quota_bytes must be at least 1".to_string(),
        ));
    }

    if config.pagination.items_per_page == 0 {
        return Err(ConfigError::ValidationError(
            "pagination.items_per_page must be at least 1".to_string(),
        ));
    }

    if config.pagination.max_visible_pages == 0 {
        return Err(ConfigError::ValidationError(
            "pagination.max_visible_pages must be at least 1".to_string(),
        ));
    }

    Ok(())
}
