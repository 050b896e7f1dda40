use std::error::Error;

/// Base trait for all sweeper errors
pub trait SweeperError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Error type handed back by external collaborators (cloud clients, listers, deleters).
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Common result type for the application
pub type SweeperResult<T> = Result<T, Box<dyn SweeperError>>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at '{path}'")]
    ConfigNotFound { path: String },

    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl SweeperError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ConfigParseError { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}

/// Render an error together with its whole `source()` chain, separated by `": "`.
///
/// Skips a source whose text is already contained in its parent's message,
/// since thiserror variants usually interpolate their source.
pub fn error_chain_text(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut current = error.source();
    while let Some(source) = current {
        let source_text = source.to_string();
        if !text.contains(&source_text) {
            text.push_str(": ");
            text.push_str(&source_text);
        }
        current = source.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweeper_result() {
        let _result: SweeperResult<i32> = Ok(42);
    }

    #[test]
    fn test_config_parse_error() {
        let error = ConfigError::ConfigParseError {
            path: "/tmp/config.toml".to_string(),
            message: "invalid TOML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file '/tmp/config.toml': invalid TOML syntax"
        );
        assert_eq!(error.error_code(), "CONFIG_PARSE_ERROR");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_invalid_configuration_error() {
        let error = ConfigError::InvalidConfiguration {
            message: "concurrency must be between 1 and 256".to_string(),
        };
        assert_eq!(error.error_code(), "INVALID_CONFIGURATION");
        assert!(error.is_user_error());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer {
        #[source]
        inner: std::io::Error,
    }

    #[test]
    fn test_error_chain_text_includes_sources() {
        let error = Outer {
            inner: std::io::Error::other("AccessDeniedException: nope"),
        };
        assert_eq!(
            error_chain_text(&error),
            "outer failure: AccessDeniedException: nope"
        );
    }

    #[test]
    fn test_error_chain_text_skips_interpolated_source() {
        let error = ConfigError::IoError {
            source: std::io::Error::other("disk gone"),
        };
        assert_eq!(
            error_chain_text(&error),
            "IO error reading config: disk gone"
        );
    }
}
