//! Core types shared by the Pearl crates.
//!
//! - [`DependencyCoordinate`]: a `(group, artifact, version)` triple and its
//!   [`ArtifactKey`] used for de-duplication.
//! - [`GenericVersion`]: a total-order version scheme for dotted, numeric and
//!   qualified version strings.
//! - [`core_packages`]: the packages a PEAR installation always ships with.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod coordinate;
pub mod core_packages;
pub mod error;
pub mod version;

pub use coordinate::{ArtifactKey, DependencyCoordinate};
pub use core_packages::{is_maven_core_package, is_pear_core_package};
pub use error::{Error, Result};
pub use version::{GenericVersion, maven_to_pear_version, pear_to_maven_version};
