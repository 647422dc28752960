//! PEAR installation configuration.
//!
//! A PEAR installation keeps its settings in `pear.conf` (`pear.ini` on
//! Windows): a `#PEAR_Config` header line followed by one serialized PHP
//! array. This crate decodes that file and exposes the directory layout,
//! with `PHP_PEAR_*` environment variables taking precedence.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod directories;
pub mod error;
pub mod loader;
pub mod source;

pub use directories::{DIRECTORY_KEYS, PearDirectories};
pub use error::{ConfigError, Result};
pub use loader::{PearConfigLoader, strip_comments};
pub use source::{CONFIG_FILE_NAMES, ConfigSource, FileConfigSource, StaticConfigSource};
