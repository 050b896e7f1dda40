//! # Configuration System
//!
//! Hierarchical TOML configuration for sweep.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.sweep/config.toml`
//! 3. **Project config** - `./.sweep/config.toml`
//! 4. **Environment** - `SWEEP` (regions), `SWEEP_RUN` (sweepers), `SWEEP_ALLOW_FAILURES`
//! 5. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use sweep_core::config::SweepConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SweepConfig::load_hierarchy()?;
//!     let settings = config.sweep_settings();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use defaults::DEFAULT_IDENTITY_PREFIX;
pub use types::{ClassifierConfig, Config, ResourceSettings, SweepConfig, SweepSection};
pub use validation::validate_config;

impl SweepConfig {
    /// Load configuration from config files and the environment.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
