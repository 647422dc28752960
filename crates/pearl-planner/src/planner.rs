//! Dependency planning.

use crate::collaborators::{
    ArtifactResolver, ChannelDeclaration, ChannelRegistry, ProjectMetadataProvider, TGZ_CLASSIFIER,
    TGZ_TYPE,
};
use crate::error::Result;
use crate::plan::{InstallPlan, PlanEntry};
use ahash::RandomState;
use indexmap::IndexMap;
use indexmap::map::Entry;
use pearl_core::{ArtifactKey, DependencyCoordinate, is_maven_core_package};
use tracing::{debug, info, trace};

/// Deduplicated dependencies, in first-seen order.
pub type DependencyMap = IndexMap<ArtifactKey, DependencyCoordinate, RandomState>;

/// Keep one coordinate per `group:artifact`, the one with the greatest
/// version.
///
/// Versions are only parsed when two coordinates collide. On equal versions
/// the first one seen is kept.
pub fn deduplicate<I>(dependencies: I) -> Result<DependencyMap>
where
    I: IntoIterator<Item = DependencyCoordinate>,
{
    let mut map = DependencyMap::with_hasher(RandomState::new());
    for dependency in dependencies {
        match map.entry(dependency.key()) {
            Entry::Vacant(slot) => {
                slot.insert(dependency);
            }
            Entry::Occupied(mut slot) => {
                let kept = slot.get().parsed_version()?;
                let candidate = dependency.parsed_version()?;
                if kept < candidate {
                    debug!(
                        artifact = %slot.key(),
                        from = %kept,
                        to = %candidate,
                        "newer duplicate replaces earlier version"
                    );
                    slot.insert(dependency);
                } else {
                    trace!(
                        artifact = %slot.key(),
                        kept = %kept,
                        dropped = %candidate,
                        "duplicate dropped"
                    );
                }
            }
        }
    }
    Ok(map)
}

/// Computes which archives to install, and in which order, for a package.
pub struct DependencyPlanner<'a> {
    metadata: &'a dyn ProjectMetadataProvider,
    artifacts: &'a dyn ArtifactResolver,
}

impl std::fmt::Debug for DependencyPlanner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyPlanner").finish_non_exhaustive()
    }
}

impl<'a> DependencyPlanner<'a> {
    /// Create a planner over the given collaborators.
    #[must_use]
    pub fn new(
        metadata: &'a dyn ProjectMetadataProvider,
        artifacts: &'a dyn ArtifactResolver,
    ) -> Self {
        Self {
            metadata,
            artifacts,
        }
    }

    /// Plan the installation of `root` and its dependencies.
    ///
    /// Channels declared by the root and by every retained dependency are
    /// registered in `registry` along the way. With `ignore_core`, PEAR core
    /// packages (including the root itself) are neither resolved nor
    /// planned. Any collaborator failure aborts planning.
    pub fn plan(
        &self,
        root: &DependencyCoordinate,
        ignore_core: bool,
        registry: &mut dyn ChannelRegistry,
    ) -> Result<InstallPlan> {
        info!(root = %root, ignore_core, "planning installation");

        let metadata = self.metadata.resolve(root)?;
        let dependencies = deduplicate(metadata.dependencies)?;
        debug!(retained = dependencies.len(), "dependencies deduplicated");

        let mut entries = Vec::with_capacity(dependencies.len() + 1);
        self.resolve_archive(root, ignore_core, &mut entries)?;
        register_channels(registry, &metadata.declared_channels)?;

        for dependency in dependencies.into_values() {
            if ignore_core && is_maven_core_package(&dependency.group, &dependency.artifact) {
                debug!(dependency = %dependency, "skipping core package");
                continue;
            }
            self.resolve_archive(&dependency, ignore_core, &mut entries)?;
            let declared = self.metadata.resolve(&dependency)?.declared_channels;
            register_channels(registry, &declared)?;
        }

        // Root first, dependencies after; reversed, dependencies install first.
        entries.reverse();
        info!(archives = entries.len(), "install plan ready");
        Ok(InstallPlan::new(entries))
    }

    fn resolve_archive(
        &self,
        coordinate: &DependencyCoordinate,
        ignore_core: bool,
        entries: &mut Vec<PlanEntry>,
    ) -> Result<()> {
        if ignore_core && is_maven_core_package(&coordinate.group, &coordinate.artifact) {
            debug!(coordinate = %coordinate, "skipping core package archive");
            return Ok(());
        }
        let file = self
            .artifacts
            .resolve(coordinate, TGZ_TYPE, Some(TGZ_CLASSIFIER))?;
        trace!(coordinate = %coordinate, file = %file.display(), "archive resolved");
        entries.push(PlanEntry {
            coordinate: coordinate.clone(),
            file,
        });
        Ok(())
    }
}

fn register_channels(
    registry: &mut dyn ChannelRegistry,
    channels: &[ChannelDeclaration],
) -> Result<()> {
    for channel in channels {
        registry.register(channel)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::ProjectMetadata;
    use crate::error::PlanError;
    use crate::registry::InMemoryChannelRegistry;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn coord(s: &str) -> DependencyCoordinate {
        DependencyCoordinate::parse(s).unwrap()
    }

    #[derive(Default)]
    struct Fixture {
        projects: HashMap<String, ProjectMetadata>,
        missing_archives: Vec<String>,
        requested: Mutex<Vec<String>>,
    }

    impl Fixture {
        fn project(mut self, root: &str, deps: &[&str], channels: &[&str]) -> Self {
            self.projects.insert(
                root.to_string(),
                ProjectMetadata {
                    dependencies: deps.iter().map(|d| coord(d)).collect(),
                    declared_channels: channels
                        .iter()
                        .map(|c| ChannelDeclaration::named(*c))
                        .collect(),
                },
            );
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl ProjectMetadataProvider for Fixture {
        fn resolve(&self, coordinate: &DependencyCoordinate) -> Result<ProjectMetadata> {
            Ok(self
                .projects
                .get(&coordinate.to_string())
                .cloned()
                .unwrap_or_default())
        }
    }

    impl ArtifactResolver for Fixture {
        fn resolve(
            &self,
            coordinate: &DependencyCoordinate,
            kind: &str,
            classifier: Option<&str>,
        ) -> Result<PathBuf> {
            assert_eq!(kind, "tgz");
            assert_eq!(classifier, Some("pear-tgz"));
            let id = coordinate.to_string();
            self.requested.lock().unwrap().push(id.clone());
            if self.missing_archives.contains(&id) {
                return Err(PlanError::ArtifactNotFound {
                    coordinate: coordinate.clone(),
                    kind: kind.to_string(),
                });
            }
            Ok(PathBuf::from(format!(
                "{}-{}.tgz",
                coordinate.artifact, coordinate.version
            )))
        }
    }

    fn plan(fixture: &Fixture, root: &str, ignore_core: bool) -> Result<InstallPlan> {
        let mut registry = InMemoryChannelRegistry::new();
        DependencyPlanner::new(fixture, fixture).plan(&coord(root), ignore_core, &mut registry)
    }

    fn files(plan: &InstallPlan) -> Vec<String> {
        plan.files().map(|f| f.display().to_string()).collect()
    }

    #[test]
    fn newest_duplicate_wins() {
        let fixture = Fixture::default().project(
            "org.example:root:1.0",
            &["org.example:lib:1.0", "org.example:lib:2.0"],
            &[],
        );
        let plan = plan(&fixture, "org.example:root:1.0", false).unwrap();
        assert_eq!(files(&plan), ["lib-2.0.tgz", "root-1.0.tgz"]);
    }

    #[test]
    fn dependency_installs_before_root() {
        let fixture = Fixture::default().project("org.example:R:1.0", &["org.example:D:1.0"], &[]);
        let plan = plan(&fixture, "org.example:R:1.0", true).unwrap();
        let d = plan.position("org.example", "D").unwrap();
        let r = plan.position("org.example", "R").unwrap();
        assert!(d < r);
        assert_eq!(r, plan.len() - 1);
    }

    #[test]
    fn core_packages_are_not_resolved() {
        let fixture = Fixture::default().project(
            "org.example:root:1.0",
            &["net.php:PEAR:1.9.4", "org.example:lib:1.0"],
            &[],
        );
        let plan = plan(&fixture, "org.example:root:1.0", true).unwrap();
        assert_eq!(plan.position("net.php", "PEAR"), None);
        assert!(!fixture.requested().iter().any(|r| r.contains("PEAR")));
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn core_packages_kept_when_not_ignored() {
        let fixture = Fixture::default().project(
            "org.example:root:1.0",
            &["net.php:PEAR:1.9.4"],
            &[],
        );
        let plan = plan(&fixture, "org.example:root:1.0", false).unwrap();
        assert_eq!(plan.position("net.php", "PEAR"), Some(0));
    }

    #[test]
    fn core_root_is_skipped() {
        let fixture = Fixture::default().project("net.php:PEAR:1.9.4", &["net.php:Archive_Tar:1.3.7", "org.example:lib:1.0"], &[]);
        let plan = plan(&fixture, "net.php:PEAR:1.9.4", true).unwrap();
        assert_eq!(files(&plan), ["lib-1.0.tgz"]);
    }

    #[test]
    fn equal_versions_keep_first() {
        let map = deduplicate([coord("g:a:1.0"), coord("g:b:3"), coord("g:a:1.0.0")]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&ArtifactKey::new("g", "a")].version, "1.0");
        let order: Vec<_> = map.keys().map(ToString::to_string).collect();
        assert_eq!(order, ["g:a", "g:b"]);
    }

    #[test]
    fn unparseable_duplicate_version_aborts() {
        let err = deduplicate([coord("g:a:1.0"), coord("g:a:1.0/beta")]).unwrap_err();
        assert!(matches!(err, PlanError::VersionSchemeInvalid(_)));
    }

    #[test]
    fn missing_archive_aborts() {
        let mut fixture =
            Fixture::default().project("org.example:root:1.0", &["org.example:lib:1.0"], &[]);
        fixture.missing_archives.push("org.example:lib:1.0".into());
        assert!(matches!(
            plan(&fixture, "org.example:root:1.0", true),
            Err(PlanError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn channels_are_registered_for_root_and_dependencies() {
        let fixture = Fixture::default()
            .project(
                "org.example:root:1.0",
                &["org.example:lib:1.0", "net.php:PEAR:1.9.4"],
                &["pear.phpunit.de"],
            )
            .project("org.example:lib:1.0", &[], &["pear.symfony-project.com", "pear.phpunit.de"])
            .project("net.php:PEAR:1.9.4", &[], &["never.example.com"]);

        let mut registry = InMemoryChannelRegistry::new();
        DependencyPlanner::new(&fixture, &fixture)
            .plan(&coord("org.example:root:1.0"), true, &mut registry)
            .unwrap();

        let names: Vec<_> = registry.channels().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["pear.phpunit.de", "pear.symfony-project.com"]);
    }
}
