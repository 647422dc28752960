//! Planning error types.

use pearl_core::DependencyCoordinate;
use std::path::PathBuf;
use thiserror::Error;

/// Planning or installation failure.
///
/// Any error aborts the whole operation; nothing already installed is
/// rolled back and nothing is retried.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The artifact resolver has no file for a coordinate.
    #[error("artifact not found: {coordinate} (type {kind})")]
    ArtifactNotFound {
        /// Requested coordinate.
        coordinate: DependencyCoordinate,
        /// Requested artifact type.
        kind: String,
    },

    /// A version could not be parsed for comparison.
    #[error("invalid version: {0}")]
    VersionSchemeInvalid(#[from] pearl_core::Error),

    /// Project metadata could not be resolved.
    #[error("failed to resolve project metadata for {coordinate}: {reason}")]
    MetadataResolutionFailed {
        /// Coordinate being resolved.
        coordinate: DependencyCoordinate,
        /// Reason for failure.
        reason: String,
    },

    /// A channel could not be registered.
    #[error("failed to register channel {channel}: {reason}")]
    ChannelRegistration {
        /// Channel name.
        channel: String,
        /// Reason for failure.
        reason: String,
    },

    /// The installer rejected a file.
    #[error("failed to install {}: {reason}", path.display())]
    InstallFailed {
        /// File being installed.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// A repository document could not be read.
    #[error("invalid repository document: {0}")]
    InvalidRepository(String),
}

impl PlanError {
    /// Create a metadata resolution error.
    pub fn metadata(coordinate: &DependencyCoordinate, reason: impl Into<String>) -> Self {
        Self::MetadataResolutionFailed {
            coordinate: coordinate.clone(),
            reason: reason.into(),
        }
    }

    /// Create an install error.
    pub fn install(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InstallFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;
