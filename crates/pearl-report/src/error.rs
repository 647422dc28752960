//! Report scanning errors.

use thiserror::Error;

/// A report line that cannot be turned into structured data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A dependency name without the `channel/package` separator.
    #[error("illegal dependency '{0}': expected channel/package")]
    IllegalDependencyName(String),

    /// An email address followed by something other than a `(role)`.
    #[error("unable to parse email and role from '{0}'")]
    MalformedMaintainer(String),

    /// Channel listing output ended inside its table header.
    #[error("unexpected channel listing output: missing table header")]
    MissingChannelHeader,
}

/// Result type for report scanning.
pub type Result<T> = std::result::Result<T, StructuralError>;
