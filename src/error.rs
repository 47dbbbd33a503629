use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for set-version-info operations
#[derive(Error, Debug)]
pub enum SetVersionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Argument error: {0}")]
    Argument(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Folder traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in set-version-info
pub type Result<T> = std::result::Result<T, SetVersionError>;

impl SetVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SetVersionError::Config(msg.into())
    }

    /// Create an invalid value error with context
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        SetVersionError::InvalidValue(msg.into())
    }

    /// Create an argument error with context
    pub fn argument(msg: impl Into<String>) -> Self {
        SetVersionError::Argument(msg.into())
    }

    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SetVersionError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Stable name of the error variant, reported as the failure type
    pub fn kind(&self) -> &'static str {
        match self {
            SetVersionError::Config(_) => "SetVersionError::Config",
            SetVersionError::InvalidValue(_) => "SetVersionError::InvalidValue",
            SetVersionError::Argument(_) => "SetVersionError::Argument",
            SetVersionError::Io { .. } => "SetVersionError::Io",
            SetVersionError::Walk(_) => "SetVersionError::Walk",
            SetVersionError::Toml(_) => "SetVersionError::Toml",
        }
    }
}
