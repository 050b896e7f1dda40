//! Configuration validation.

use crate::config::types::SweepConfig;
use crate::errors::ConfigError;

pub const MAX_CONCURRENCY: usize = 256;

/// Validate the configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` for out-of-range concurrency,
/// a zero deletion timeout, blank region or sweeper names, or a blank
/// identity prefix.
pub fn validate_config(config: &SweepConfig) -> Result<(), ConfigError> {
    if let Some(concurrency) = config.sweep.concurrency
        && !(1..=MAX_CONCURRENCY).contains(&concurrency)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "sweep.concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY, concurrency
            ),
        });
    }

    if config.sweep.delete_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "sweep.delete_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.sweep.regions.iter().any(|r| r.trim().is_empty()) {
        return Err(ConfigError::InvalidConfiguration {
            message: "sweep.regions cannot contain empty names".to_string(),
        });
    }

    if config.sweep.sweepers.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::InvalidConfiguration {
            message: "sweep.sweepers cannot contain empty names".to_string(),
        });
    }

    for (name, settings) in &config.resources {
        if let Some(prefix) = &settings.identity_prefix
            && prefix.trim().is_empty()
        {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("resources.{}.identity_prefix cannot be empty", name),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ResourceSettings;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SweepConfig::default()).is_ok());
    }

    #[test]
    fn test_concurrency_bounds() {
        let mut config = SweepConfig::default();
        config.sweep.concurrency = Some(0);
        assert!(validate_config(&config).is_err());

        config.sweep.concurrency = Some(MAX_CONCURRENCY + 1);
        assert!(validate_config(&config).is_err());

        config.sweep.concurrency = Some(MAX_CONCURRENCY);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = SweepConfig::default();
        config.sweep.delete_timeout_secs = Some(0);
        let error = validate_config(&config).unwrap_err();
        assert!(error.to_string().contains("delete_timeout_secs"));
    }

    #[test]
    fn test_blank_region_rejected() {
        let mut config = SweepConfig::default();
        config.sweep.regions = vec!["us-west-2".to_string(), " ".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_identity_prefix_rejected() {
        let mut config = SweepConfig::default();
        config.resources.insert(
            "cloud_app".to_string(),
            ResourceSettings {
                identity_prefix: Some("".to_string()),
                dependencies: vec![],
            },
        );
        let error = validate_config(&config).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid configuration: resources.cloud_app.identity_prefix cannot be empty"
        );
    }
}
