//! Errors owned by the domain layer

use thiserror::Error;

/// Error when parsing a timecode string
#[derive(Debug, Clone, Error)]
#[error("Invalid timecode: \"{input}\". Expected <minutes>:<seconds> (e.g., 1:05) or a millisecond count (e.g., 65000)")]
pub struct TimecodeParseError {
    pub input: String,
}

/// Error when an invalid quality preset is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid quality: \"{input}\". Valid presets are: high, low")]
pub struct InvalidQualityError {
    pub input: String,
}

/// Errors from loading, validating, or writing settings
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    ReadError(String),

    #[error("Config file is not valid TOML: {0}")]
    ParseError(String),

    #[error("Could not write config file: {0}")]
    WriteError(String),

    #[error("Invalid value for key '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists: {0}")]
    AlreadyExists(String),
}
