use super::{types::Config, ConfigError};

/// Largest batch the upstream API serves in one call
pub const MAX_BATCH_SIZE: u32 = 50;

/// Validate configuration
/// Currently validates:
/// - Upstream base URL is set
/// - Fetch loop bounds (target, batch size, stagnation limit)
/// - Image sizes and qualities
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.upstream.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "upstream.base_url cannot be empty".to_string(),
        ));
    }

    let fetch = &config.fetch;
    if fetch.target_count == 0 {
        return Err(ConfigError::ValidationError(
            "fetch.target_count must be at least 1".to_string(),
        ));
    }
    if fetch.batch_size == 0 || fetch.batch_size > MAX_BATCH_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "fetch.batch_size must be between 1 and {}",
            MAX_BATCH_SIZE
        )));
    }
    if fetch.stagnation_limit == 0 {
        return Err(ConfigError::ValidationError(
            "fetch.stagnation_limit must be at least 1".to_string(),
        ));
    }
    if fetch.channels.iter().any(|c| c.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "fetch.channels cannot contain empty names".to_string(),
        ));
    }

    let optimize = &config.optimize;
    if optimize.max_dimension == 0 || optimize.thumb_size == 0 {
        return Err(ConfigError::ValidationError(
            "optimize.max_dimension and optimize.thumb_size cannot be 0".to_string(),
        ));
    }
    if optimize.quality > 100 || optimize.thumb_quality > 100 {
        return Err(ConfigError::ValidationError(
            "optimize qualities must be between 0 and 100".to_string(),
        ));
    }

    if config.placeholder.size == 0 {
        return Err(ConfigError::ValidationError(
            "placeholder.size cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_batch_size_bounds() {
        let mut config = Config::default();
        config.fetch.batch_size = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));

        config.fetch.batch_size = MAX_BATCH_SIZE + 1;
        assert!(validate_config(&config).is_err());

        config.fetch.batch_size = MAX_BATCH_SIZE;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_stagnation_limit_zero_fails() {
        let mut config = Config::default();
        config.fetch.stagnation_limit = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_channel_fails() {
        let mut config = Config::default();
        config.fetch.channels = vec!["memes".to_string(), " ".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_quality_out_of_range() {
        let mut config = Config::default();
        config.optimize.thumb_quality = 101;
        assert!(validate_config(&config).is_err());
    }
}
