//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.sweep/config.toml`
//! 3. **Project config** - `./.sweep/config.toml`
//! 4. **Environment** - `SWEEP`, `SWEEP_RUN`, `SWEEP_ALLOW_FAILURES`
//! 5. **CLI arguments** - applied by the binary (highest priority)

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::types::{ClassifierConfig, Config, SweepConfig, SweepSection};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Comma-separated list of regions to sweep.
pub const ENV_REGIONS: &str = "SWEEP";
/// Comma-separated list of sweeper names to run.
pub const ENV_SWEEPERS: &str = "SWEEP_RUN";
/// `true`/`false`: keep running after a sweeper fails.
pub const ENV_ALLOW_FAILURES: &str = "SWEEP_ALLOW_FAILURES";

/// Load configuration from the hierarchy of config files and the environment.
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<SweepConfig, ConfigError> {
    let user_path = Config::new().user_config_path();
    let project_path = std::env::current_dir()?.join(".sweep").join("config.toml");
    load_from_paths(&user_path, &project_path, |key| std::env::var(key).ok())
}

/// Load the hierarchy from explicit paths and an environment lookup.
pub fn load_from_paths<F>(
    user_path: &Path,
    project_path: &Path,
    env: F,
) -> Result<SweepConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = SweepConfig::default();

    if let Some(user_config) = load_optional_config_file(user_path)? {
        config = merge_configs(config, user_config);
    }

    if let Some(project_config) = load_optional_config_file(project_path)? {
        config = merge_configs(config, project_config);
    }

    let config = apply_env_overrides(config, env)?;

    validate_config(&config)?;

    Ok(config)
}

fn load_optional_config_file(path: &Path) -> Result<Option<SweepConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::ConfigNotFound { .. }) => {
            debug!(event = "core.config.file_not_found", path = %path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<SweepConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            ConfigError::IoError { source: e }
        }
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields are replaced only when set in the override. Region and
/// sweeper lists are replaced when non-empty. Benign signatures are unioned.
pub fn merge_configs(base: SweepConfig, override_config: SweepConfig) -> SweepConfig {
    let over = override_config.sweep;
    SweepConfig {
        sweep: SweepSection {
            regions: if over.regions.is_empty() {
                base.sweep.regions
            } else {
                over.regions
            },
            sweepers: if over.sweepers.is_empty() {
                base.sweep.sweepers
            } else {
                over.sweepers
            },
            concurrency: over.concurrency.or(base.sweep.concurrency),
            delete_timeout_secs: over.delete_timeout_secs.or(base.sweep.delete_timeout_secs),
            dry_run: over.dry_run.or(base.sweep.dry_run),
            allow_failures: over.allow_failures.or(base.sweep.allow_failures),
        },
        classifier: ClassifierConfig {
            benign_signatures: {
                let mut merged = base.classifier.benign_signatures;
                for signature in override_config.classifier.benign_signatures {
                    if !merged.contains(&signature) {
                        merged.push(signature);
                    }
                }
                merged
            },
        },
        resources: {
            let mut merged = base.resources;
            for (key, value) in override_config.resources {
                merged.insert(key, value);
            }
            merged
        },
    }
}

/// Apply `SWEEP`, `SWEEP_RUN` and `SWEEP_ALLOW_FAILURES` on top of file config.
pub fn apply_env_overrides<F>(mut config: SweepConfig, env: F) -> Result<SweepConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(regions) = env(ENV_REGIONS) {
        let regions = split_list(&regions);
        if !regions.is_empty() {
            config.sweep.regions = regions;
        }
    }

    if let Some(sweepers) = env(ENV_SWEEPERS) {
        let sweepers = split_list(&sweepers);
        if !sweepers.is_empty() {
            config.sweep.sweepers = sweepers;
        }
    }

    if let Some(value) = env(ENV_ALLOW_FAILURES) {
        config.sweep.allow_failures = Some(parse_bool(ENV_ALLOW_FAILURES, &value)?);
    }

    Ok(config)
}

/// Split a comma-separated list, dropping blanks.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidConfiguration {
            message: format!("{} must be true or false, got '{}'", key, other),
        }),
    }
}
