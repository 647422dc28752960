//! Dependency coordinates.

use crate::error::{Error, Result};
use crate::version::GenericVersion;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an artifact regardless of its version (`group:artifact`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactKey {
    group: String,
    artifact: String,
}

impl ArtifactKey {
    /// Create a new key.
    #[must_use]
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Group (or PEAR channel).
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Artifact (or PEAR package) name.
    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.artifact
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// A `(group, artifact, version)` triple identifying one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyCoordinate {
    /// Group id or PEAR channel.
    pub group: String,
    /// Artifact id or PEAR package name.
    pub artifact: String,
    /// Version string, compared with [`GenericVersion`].
    pub version: String,
}

impl DependencyCoordinate {
    /// Create a new coordinate.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Parse from `group:artifact:version`.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(artifact), Some(version))
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(group, artifact, version))
            }
            _ => Err(Error::InvalidCoordinate(s.to_string())),
        }
    }

    /// Key used to de-duplicate coordinates that differ only in version.
    #[must_use]
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(self.group.clone(), self.artifact.clone())
    }

    /// Parse this coordinate's version with the generic version scheme.
    pub fn parsed_version(&self) -> Result<GenericVersion> {
        GenericVersion::parse(&self.version)
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}
