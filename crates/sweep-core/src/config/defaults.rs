//! Default values and accessors for configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::types::{Config, SweepConfig, SweepSection};
use crate::sweep::classifier::SkipClassifier;
use crate::sweep::handler::SweepSettings;
use crate::sweep::orchestrator::{DEFAULT_CONCURRENCY, DEFAULT_DELETE_TIMEOUT, OrchestratorOptions};

/// Placeholder used when a resource type has no configured identity prefix.
pub const DEFAULT_IDENTITY_PREFIX: &str = "xxxx";

impl Default for Config {
    fn default() -> Self {
        let sweep_dir = match dirs::home_dir() {
            Some(home) => home.join(".sweep"),
            None => {
                eprintln!(
                    "Warning: Could not find home directory. Set HOME environment variable. \
                    Using fallback directory."
                );
                std::env::temp_dir().join(".sweep")
            }
        };

        Self { sweep_dir }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_config_path(&self) -> PathBuf {
        self.sweep_dir.join("config.toml")
    }
}

impl SweepSection {
    /// Returns the deletion concurrency, defaulting to 10.
    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// Returns the per-deletion timeout, defaulting to 300 seconds.
    pub fn delete_timeout(&self) -> Duration {
        self.delete_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_DELETE_TIMEOUT)
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    pub fn allow_failures(&self) -> bool {
        self.allow_failures.unwrap_or(false)
    }
}

impl SweepConfig {
    /// Identity prefix for a resource type, falling back to the placeholder.
    pub fn identity_prefix(&self, resource: &str) -> &str {
        self.resources
            .get(resource)
            .and_then(|r| r.identity_prefix.as_deref())
            .unwrap_or(DEFAULT_IDENTITY_PREFIX)
    }

    pub fn dependencies(&self, resource: &str) -> &[String] {
        self.resources
            .get(resource)
            .map(|r| r.dependencies.as_slice())
            .unwrap_or(&[])
    }

    pub fn classifier(&self) -> SkipClassifier {
        SkipClassifier::default().with_additional(self.classifier.benign_signatures.iter().cloned())
    }

    pub fn sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            orchestrator: OrchestratorOptions {
                concurrency: self.sweep.concurrency(),
                delete_timeout: self.sweep.delete_timeout(),
            },
            classifier: self.classifier(),
            dry_run: self.sweep.dry_run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ResourceSettings;
    use crate::sweep::classifier::DEFAULT_BENIGN_SIGNATURES;

    #[test]
    fn test_config_default() {
        let config = Config::new();
        assert!(config.sweep_dir.to_string_lossy().contains(".sweep"));
        assert!(
            config
                .user_config_path()
                .to_string_lossy()
                .ends_with("config.toml")
        );
    }

    #[test]
    fn test_sweep_section_defaults() {
        let section = SweepSection::default();
        assert_eq!(section.concurrency(), 10);
        assert_eq!(section.delete_timeout(), Duration::from_secs(300));
        assert!(!section.dry_run());
        assert!(!section.allow_failures());
    }

    #[test]
    fn test_identity_prefix_default_and_override() {
        let mut config = SweepConfig::default();
        assert_eq!(config.identity_prefix("cloud_app"), "xxxx");

        config.resources.insert(
            "cloud_app".to_string(),
            ResourceSettings {
                identity_prefix: Some("123456789012".to_string()),
                dependencies: vec![],
            },
        );
        assert_eq!(config.identity_prefix("cloud_app"), "123456789012");
        assert_eq!(config.identity_prefix("cloud_vm"), "xxxx");
    }

    #[test]
    fn test_sweep_settings_from_config() {
        let mut config = SweepConfig::default();
        config.sweep.concurrency = Some(3);
        config.sweep.delete_timeout_secs = Some(30);
        config.sweep.dry_run = Some(true);
        config.classifier.benign_signatures = vec!["OptInRequired".to_string()];

        let settings = config.sweep_settings();
        assert_eq!(settings.orchestrator.concurrency, 3);
        assert_eq!(settings.orchestrator.delete_timeout, Duration::from_secs(30));
        assert!(settings.dry_run);
        assert_eq!(
            settings.classifier.signatures().len(),
            DEFAULT_BENIGN_SIGNATURES.len() + 1
        );
    }
}
