//! Error types shared by the Pearl crates.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A version string could not be parsed by the generic version scheme.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion {
        /// The offending version string.
        version: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A coordinate string is not of the form `group:artifact:version`.
    #[error("invalid coordinate '{0}', expected group:artifact:version")]
    InvalidCoordinate(String),

    /// A Maven version contains characters that have no PEAR equivalent.
    #[error("invalid maven version: {0}")]
    InvalidMavenVersion(String),
}

impl Error {
    /// Create an invalid-version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
