/// Structured error types for aegis-core.
///
/// Uses `thiserror` so the binary crate (aegis-cli) can wrap these in `anyhow`
/// while library consumers still match on concrete variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for aegis-core operations
#[derive(Error, Debug)]
pub enum AegisError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Unknown search filter field
    #[error("Unknown filter field '{field}'")]
    UnknownFilterField { field: String },

    /// Filter value not valid for its field
    #[error("Invalid value '{value}' for filter '{field}'")]
    InvalidFilterValue { field: String, value: String },

    /// Unknown prompt template id
    #[error("Unknown template '{id}' (expected health, climate or policy)")]
    UnknownTemplate { id: String },

    /// Unknown source category
    #[error("Unknown source category '{value}'")]
    UnknownCategory { value: String },
}

/// Result type alias for aegis-core operations
pub type Result<T> = std::result::Result<T, AegisError>;

impl AegisError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an unknown filter field error
    pub fn unknown_filter_field(field: impl Into<String>) -> Self {
        Self::UnknownFilterField {
            field: field.into(),
        }
    }

    /// Create an invalid filter value error
    pub fn invalid_filter_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidFilterValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an unknown template error
    pub fn unknown_template(id: impl Into<String>) -> Self {
        Self::UnknownTemplate { id: id.into() }
    }
}
