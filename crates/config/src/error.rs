//! Error types for configuration loading

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading or validating a [`crate::BridgeConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML document was malformed or had unexpected types.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A log level string did not name a known level.
    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),

    /// A field held a value that parsed but is not acceptable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ConfigError {
    /// Helper for creating an invalid configuration error with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
