//! Interfaces to the systems the planner drives.
//!
//! The planner never talks to a repository, a channel server or the `pear`
//! executable directly. Implement these traits to connect it to real ones;
//! [`MemoryRepository`](crate::MemoryRepository) and
//! [`InMemoryChannelRegistry`](crate::InMemoryChannelRegistry) cover tests
//! and offline use.

use crate::error::Result;
use pearl_core::DependencyCoordinate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Artifact type of installable PEAR archives.
pub const TGZ_TYPE: &str = "tgz";

/// Classifier of installable PEAR archives.
pub const TGZ_CLASSIFIER: &str = "pear-tgz";

/// A channel a project declares it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDeclaration {
    /// Channel name, e.g. `pear.phpunit.de`.
    pub name: String,
    /// Suggested alias.
    #[serde(default)]
    pub alias: Option<String>,
    /// Summary.
    #[serde(default)]
    pub summary: Option<String>,
}

impl ChannelDeclaration {
    /// Declare a channel by name only.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            summary: None,
        }
    }
}

/// Metadata of one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Direct and transitive dependencies, flattened. The same artifact may
    /// appear several times, possibly at different versions.
    pub dependencies: Vec<DependencyCoordinate>,
    /// Channels the project needs registered.
    pub declared_channels: Vec<ChannelDeclaration>,
}

/// Resolves project metadata (dependencies and channels) for a coordinate.
pub trait ProjectMetadataProvider: Send + Sync {
    /// Resolve metadata; fails with `MetadataResolutionFailed`.
    fn resolve(&self, coordinate: &DependencyCoordinate) -> Result<ProjectMetadata>;
}

/// Resolves a coordinate to a local file.
pub trait ArtifactResolver: Send + Sync {
    /// Resolve an artifact of the given type and classifier; fails with
    /// `ArtifactNotFound`.
    fn resolve(
        &self,
        coordinate: &DependencyCoordinate,
        kind: &str,
        classifier: Option<&str>,
    ) -> Result<PathBuf>;
}

/// Known channels. Registration is idempotent.
pub trait ChannelRegistry {
    /// Register a channel unless one with the same name or alias is known.
    ///
    /// Returns `true` if the channel was added.
    fn register(&mut self, channel: &ChannelDeclaration) -> Result<bool>;

    /// Whether a channel is known by name or alias.
    fn is_known(&self, name: &str) -> bool;
}

/// Options passed to the installer for every plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallOptions {
    /// Overwrite already installed files.
    pub force: bool,
    /// Do not resolve dependencies during installation.
    pub no_deps: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            force: true,
            no_deps: true,
        }
    }
}

impl InstallOptions {
    /// Command-line flags for `pear install`.
    #[must_use]
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::with_capacity(2);
        if self.force {
            flags.push("--force");
        }
        if self.no_deps {
            flags.push("--nodeps");
        }
        flags
    }
}

/// Installs one archive into the PEAR installation.
pub trait Installer {
    /// Install `file`; fails with `InstallFailed`.
    fn install(&mut self, file: &Path, options: InstallOptions) -> Result<()>;
}

impl<T: ProjectMetadataProvider> ProjectMetadataProvider for Arc<T> {
    fn resolve(&self, coordinate: &DependencyCoordinate) -> Result<ProjectMetadata> {
        (**self).resolve(coordinate)
    }
}

impl<T: ArtifactResolver> ArtifactResolver for Arc<T> {
    fn resolve(
        &self,
        coordinate: &DependencyCoordinate,
        kind: &str,
        classifier: Option<&str>,
    ) -> Result<PathBuf> {
        (**self).resolve(coordinate, kind, classifier)
    }
}
