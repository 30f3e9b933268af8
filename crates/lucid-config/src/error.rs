//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file {0} does not exist")]
    NotFound(String),

    #[error("Malformed config: {0}")]
    InvalidFormat(String),

    #[error("{field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("${{{0}}} is referenced in the config but not set")]
    EnvVarNotSet(String),

    #[error("Cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
