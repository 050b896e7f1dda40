//! Configuration type definitions for sweep.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [sweep]
//! regions = ["us-west-2", "us-east-1"]
//! concurrency = 10
//! delete_timeout_secs = 300
//!
//! [classifier]
//! benign_signatures = ["OptInRequired"]
//!
//! [resources.cloud_app]
//! identity_prefix = "123456789012"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Runtime paths derived from the environment, not from config files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for user-level sweep data (default: ~/.sweep)
    pub sweep_dir: PathBuf,
}

/// Main configuration loaded from TOML config files.
///
/// Loaded from the user config (`~/.sweep/config.toml`) and then the project
/// config (`./.sweep/config.toml`); project values override user values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepConfig {
    /// Run-wide settings
    #[serde(default)]
    pub sweep: SweepSection,

    /// Extra benign error signatures
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Per-resource-type settings keyed by sweeper name
    #[serde(default)]
    pub resources: HashMap<String, ResourceSettings>,
}

/// Run-wide settings in the `[sweep]` section.
///
/// Unset options fall back to the defaults in `defaults.rs`; keeping them
/// optional lets a project file override a user file only where it says so.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepSection {
    /// Regions to sweep. Overridden by the `SWEEP` env var and `--region`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,

    /// Restrict the run to these sweepers (and their dependencies).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sweepers: Vec<String>,

    /// Maximum deletions in flight per sweeper. Default: 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Timeout for a single deletion call. Default: 300 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_timeout_secs: Option<u64>,

    /// List without deleting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    /// Keep running other sweepers after one fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_failures: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassifierConfig {
    /// Added to the built-in signatures, never replacing them.
    #[serde(default)]
    pub benign_signatures: Vec<String>,
}

/// Settings for one resource type, in `[resources.<name>]`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourceSettings {
    /// Prefix of the composite identity synthesized at listing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_prefix: Option<String>,

    /// Extra sweepers that must run before this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}
