//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `${VAR}` substitution could not be performed.
    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Environment variable {0} is referenced in the config but not set")]
    EnvVarNotSet(String),

    /// An environment override did not parse.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
