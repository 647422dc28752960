//! Configuration error types.

use pearl_serialized::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `pear.conf` nor `pear.ini` exists in the install directory.
    #[error("no pear.conf or pear.ini in {}", .0.display())]
    NotFound(PathBuf),

    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not a valid serialized value.
    #[error("failed to decode configuration: {0}")]
    Parse(#[from] ParseError),

    /// The decoded configuration is not an array.
    #[error("configuration root is not an array")]
    NotAnArray,

    /// A required directory key is missing.
    #[error("missing configuration key: {0}")]
    MissingKey(&'static str),

    /// A directory key holds something other than a string.
    #[error("configuration key {key} is not a string: {found}")]
    InvalidValue {
        /// Configuration key.
        key: &'static str,
        /// The value found, in wire format.
        found: String,
    },
}

impl ConfigError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
