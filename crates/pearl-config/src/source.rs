//! Where raw configuration text comes from.

use crate::error::{ConfigError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["pear.conf", "pear.ini"];

/// Supplies raw configuration text.
pub trait ConfigSource: fmt::Debug + Send + Sync {
    /// Read the configuration text.
    fn read(&self) -> Result<String>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Configuration read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    /// Read from an explicit file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Find `pear.conf` (or `pear.ini`) in a PEAR install directory.
    pub fn discover(install_dir: &Path) -> Result<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| install_dir.join(name))
            .find(|path| path.is_file())
            .map(Self::new)
            .ok_or_else(|| ConfigError::NotFound(install_dir.to_path_buf()))
    }

    /// The file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn read(&self) -> Result<String> {
        debug!(path = %self.path.display(), "reading pear configuration");
        std::fs::read_to_string(&self.path).map_err(|e| ConfigError::io(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Configuration held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource(pub String);

impl ConfigSource for StaticConfigSource {
    fn read(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
