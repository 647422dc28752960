//! Install plans and their execution.

use crate::collaborators::{InstallOptions, Installer};
use crate::error::Result;
use pearl_core::{DependencyCoordinate, maven_to_pear_version};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One archive to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Coordinate the archive was resolved from.
    pub coordinate: DependencyCoordinate,
    /// Local archive file.
    pub file: PathBuf,
}

impl PlanEntry {
    /// The entry's version in PEAR spelling (`1.5.0-alpha-1` becomes `1.5.0a1`).
    pub fn pear_version(&self) -> pearl_core::Result<String> {
        maven_to_pear_version(&self.coordinate.version)
    }
}

/// Archives in installation order.
///
/// The order is "shallow": the root package comes last and every retained
/// dependency before it, but dependencies are not ordered relative to each
/// other. This is enough when every package is installed without dependency
/// checks (see [`InstallOptions`]); it is not a topological sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    entries: Vec<PlanEntry>,
}

impl InstallPlan {
    /// Build a plan from entries already in installation order.
    #[must_use]
    pub const fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    /// Entries in installation order.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Archive files in installation order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.file.as_path())
    }

    /// Number of archives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to install.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry for `group:artifact`, if planned.
    #[must_use]
    pub fn position(&self, group: &str, artifact: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.coordinate.group == group && e.coordinate.artifact == artifact)
    }

    /// Install every entry in order, stopping at the first failure.
    ///
    /// Returns the number of archives installed.
    pub fn execute(&self, installer: &mut dyn Installer, options: InstallOptions) -> Result<usize> {
        for (index, entry) in self.entries.iter().enumerate() {
            debug!(
                step = index + 1,
                total = self.entries.len(),
                coordinate = %entry.coordinate,
                "installing"
            );
            installer.install(&entry.file, options)?;
        }
        info!(installed = self.entries.len(), "install plan executed");
        Ok(self.entries.len())
    }
}

impl IntoIterator for InstallPlan {
    type Item = PlanEntry;
    type IntoIter = std::vec::IntoIter<PlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Installer that records the `pear install` commands it would run.
#[derive(Debug, Clone, Default)]
pub struct DryRunInstaller {
    commands: Vec<String>,
}

impl DryRunInstaller {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in order.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Installer for DryRunInstaller {
    fn install(&mut self, file: &Path, options: InstallOptions) -> Result<()> {
        let mut words = vec!["install".to_string()];
        words.extend(options.flags().into_iter().map(str::to_string));
        words.push(format!("\"{}\"", file.display()));
        self.commands.push(words.join(" "));
        Ok(())
    }
}
