//! Install planning for PEAR packages published to a Maven-style repository.
//!
//! Given a root coordinate, the [`DependencyPlanner`] asks a
//! [`ProjectMetadataProvider`] for the root's flattened dependency list,
//! keeps the newest version of every `group:artifact`, drops PEAR core
//! packages on request, resolves each remaining `tgz` archive through an
//! [`ArtifactResolver`], registers declared channels in a
//! [`ChannelRegistry`], and returns an [`InstallPlan`] with dependencies
//! ahead of the root.
//!
//! # Example
//!
//! ```
//! use pearl_core::DependencyCoordinate;
//! use pearl_planner::{
//!     DependencyPlanner, DryRunInstaller, InMemoryChannelRegistry, InstallOptions,
//!     MemoryRepository, ProjectRecord,
//! };
//!
//! let root = DependencyCoordinate::new("org.example", "app", "1.0");
//! let lib = DependencyCoordinate::new("org.example", "lib", "2.0");
//!
//! let mut repo = MemoryRepository::new("/repo");
//! repo.insert(ProjectRecord::new(root.clone()).with_dependency(lib.clone()));
//! repo.insert(ProjectRecord::new(lib));
//!
//! let mut channels = InMemoryChannelRegistry::new();
//! let plan = DependencyPlanner::new(&repo, &repo)
//!     .plan(&root, true, &mut channels)
//!     .unwrap();
//! assert_eq!(plan.position("org.example", "app"), Some(1));
//!
//! let mut installer = DryRunInstaller::new();
//! plan.execute(&mut installer, InstallOptions::default()).unwrap();
//! assert_eq!(installer.commands().len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod collaborators;
pub mod error;
pub mod memory;
pub mod plan;
pub mod planner;
pub mod registry;

pub use collaborators::{
    ArtifactResolver, ChannelDeclaration, ChannelRegistry, InstallOptions, Installer,
    ProjectMetadata, ProjectMetadataProvider, TGZ_CLASSIFIER, TGZ_TYPE,
};
pub use error::{PlanError, Result};
pub use memory::{MemoryRepository, ProjectRecord};
pub use plan::{DryRunInstaller, InstallPlan, PlanEntry};
pub use planner::{DependencyMap, DependencyPlanner, deduplicate};
pub use registry::InMemoryChannelRegistry;
