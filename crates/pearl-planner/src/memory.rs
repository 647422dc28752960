//! In-memory project repository.

use crate::collaborators::{ArtifactResolver, ChannelDeclaration, ProjectMetadata, ProjectMetadataProvider};
use crate::error::{PlanError, Result};
use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use pearl_core::{ArtifactKey, DependencyCoordinate};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, trace};

/// One project known to a [`MemoryRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRecord {
    /// The project's coordinate.
    pub coordinate: DependencyCoordinate,
    /// Direct dependencies.
    #[serde(default)]
    pub dependencies: Vec<DependencyCoordinate>,
    /// Channels the project needs.
    #[serde(default)]
    pub channels: Vec<ChannelDeclaration>,
    /// Archive file; derived from the repository layout when absent.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl ProjectRecord {
    /// Create a record with no dependencies or channels.
    #[must_use]
    pub const fn new(coordinate: DependencyCoordinate) -> Self {
        Self {
            coordinate,
            dependencies: Vec::new(),
            channels: Vec::new(),
            file: None,
        }
    }

    /// Add a direct dependency.
    #[must_use]
    pub fn with_dependency(mut self, dependency: DependencyCoordinate) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Add a channel declaration.
    #[must_use]
    pub fn with_channel(mut self, channel: ChannelDeclaration) -> Self {
        self.channels.push(channel);
        self
    }
}

#[derive(Debug, Deserialize)]
struct RepositoryDocument {
    #[serde(default)]
    base_dir: Option<PathBuf>,
    projects: Vec<ProjectRecord>,
}

/// Project metadata and archives held in memory.
///
/// Archives resolve to the Maven repository layout under a base directory:
/// `<base>/<group as path>/<artifact>/<version>/<artifact>-<version>-<classifier>.<type>`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    base_dir: PathBuf,
    projects: IndexMap<String, ProjectRecord, RandomState>,
}

impl MemoryRepository {
    /// Create an empty repository rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            projects: IndexMap::with_hasher(RandomState::new()),
        }
    }

    /// Load a repository from a JSON document.
    ///
    /// ```json
    /// {
    ///   "base_dir": "/var/cache/pearl",
    ///   "projects": [
    ///     {
    ///       "coordinate": {"group": "org.example", "artifact": "app", "version": "1.0"},
    ///       "dependencies": [{"group": "net.php", "artifact": "PEAR", "version": "1.9.4"}],
    ///       "channels": [{"name": "pear.phpunit.de", "alias": "phpunit"}]
    ///     }
    ///   ]
    /// }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RepositoryDocument =
            sonic_rs::from_str(json).map_err(|e| PlanError::InvalidRepository(e.to_string()))?;
        let mut repository = Self::new(document.base_dir.unwrap_or_default());
        for project in document.projects {
            repository.insert(project);
        }
        debug!(projects = repository.len(), "repository loaded");
        Ok(repository)
    }

    /// Add or replace a project.
    pub fn insert(&mut self, project: ProjectRecord) {
        self.projects.insert(project.coordinate.to_string(), project);
    }

    /// Look up a project by exact coordinate.
    #[must_use]
    pub fn get(&self, coordinate: &DependencyCoordinate) -> Option<&ProjectRecord> {
        self.projects.get(&coordinate.to_string())
    }

    /// Number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Depth-first walk collecting every dependency occurrence.
    ///
    /// Each occurrence is reported, so diamonds yield duplicates; a project
    /// is expanded only once, which also stops cycles. Occurrences of the
    /// root artifact itself are never reported.
    fn collect(
        &self,
        root: &ArtifactKey,
        project: &ProjectRecord,
        expanded: &mut IndexSet<String, RandomState>,
        out: &mut Vec<DependencyCoordinate>,
    ) {
        for dependency in &project.dependencies {
            if dependency.key() == *root {
                trace!(dependency = %dependency, "skipping cycle back to root");
                continue;
            }
            out.push(dependency.clone());
            let id = dependency.to_string();
            if !expanded.insert(id.clone()) {
                continue;
            }
            match self.projects.get(&id) {
                Some(child) => self.collect(root, child, expanded, out),
                None => trace!(dependency = %dependency, "dependency has no project record"),
            }
        }
    }
}

impl ProjectMetadataProvider for MemoryRepository {
    fn resolve(&self, coordinate: &DependencyCoordinate) -> Result<ProjectMetadata> {
        let project = self
            .get(coordinate)
            .ok_or_else(|| PlanError::metadata(coordinate, "no such project"))?;

        let mut expanded = IndexSet::with_hasher(RandomState::new());
        expanded.insert(coordinate.to_string());
        let mut dependencies = Vec::new();
        self.collect(&coordinate.key(), project, &mut expanded, &mut dependencies);

        Ok(ProjectMetadata {
            dependencies,
            declared_channels: project.channels.clone(),
        })
    }
}

impl ArtifactResolver for MemoryRepository {
    fn resolve(
        &self,
        coordinate: &DependencyCoordinate,
        kind: &str,
        classifier: Option<&str>,
    ) -> Result<PathBuf> {
        let project = self
            .get(coordinate)
            .ok_or_else(|| PlanError::ArtifactNotFound {
                coordinate: coordinate.clone(),
                kind: kind.to_string(),
            })?;
        if let Some(file) = &project.file {
            return Ok(file.clone());
        }

        let mut path = self.base_dir.clone();
        path.extend(coordinate.group.split('.'));
        path.push(&coordinate.artifact);
        path.push(&coordinate.version);
        let name = match classifier {
            Some(classifier) => format!(
                "{}-{}-{classifier}.{kind}",
                coordinate.artifact, coordinate.version
            ),
            None => format!("{}-{}.{kind}", coordinate.artifact, coordinate.version),
        };
        path.push(name);
        Ok(path)
    }
}
