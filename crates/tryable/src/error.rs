//! Error types for executor configuration.
//!
//! Faults raised by a producer are never wrapped in [`Error`]: they propagate
//! out of the terminal call unchanged. This type only covers configuration
//! that is loaded at runtime.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building executor configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value was rejected.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A settings document could not be parsed.
    #[error("Invalid settings document: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment variable held something other than an integer.
    #[error("Invalid value {value:?} for environment variable {var}")]
    InvalidEnv {
        /// Name of the offending variable
        var: &'static str,
        /// The raw value that failed to parse
        value: String,
    },

    /// A settings file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error came from loading or parsing settings.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Toml(_) | Error::InvalidEnv { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("interval overflow");
        assert_eq!(err.to_string(), "Configuration error: interval overflow");

        let err = Error::InvalidEnv {
            var: "TRYABLE_RETRIES",
            value: "many".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value \"many\" for environment variable TRYABLE_RETRIES"
        );
    }

    #[test]
    fn test_config_classification() {
        assert!(Error::config("x").is_config_error());

        let toml_err = toml::from_str::<toml::Value>("retries = =").unwrap_err();
        assert!(Error::from(toml_err).is_config_error());

        let io = Error::from(std::io::Error::other("disk gone"));
        assert!(!io.is_config_error());
    }
}
