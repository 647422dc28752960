//! Loads and caches the directory layout.

use crate::directories::PearDirectories;
use crate::error::Result;
use crate::source::{ConfigSource, FileConfigSource};
use once_cell::sync::OnceCell;
use pearl_serialized::Decoder;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Strip the leading `#` comment lines (`#PEAR_Config 0.9`).
///
/// Whitespace after each comment line is dropped too. Everything from the
/// first non-comment line on is kept verbatim, since string payloads may
/// contain newlines.
#[must_use]
pub fn strip_comments(text: &str) -> &str {
    let mut rest = text;
    while rest.starts_with('#') {
        rest = rest
            .split_once('\n')
            .map_or("", |(_, tail)| tail)
            .trim_start();
    }
    rest
}

/// Loads [`PearDirectories`] from a [`ConfigSource`] once.
pub struct PearConfigLoader {
    source: Box<dyn ConfigSource>,
    env: EnvLookup,
    cached: OnceCell<PearDirectories>,
}

impl fmt::Debug for PearConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PearConfigLoader")
            .field("source", &self.source)
            .field("loaded", &self.cached.get().is_some())
            .finish_non_exhaustive()
    }
}

impl PearConfigLoader {
    /// Create a loader reading the process environment for overrides.
    #[must_use]
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        Self::with_env(source, |var| std::env::var(var).ok())
    }

    /// Create a loader for the `pear.conf`/`pear.ini` in `install_dir`.
    pub fn for_install_dir(install_dir: &Path) -> Result<Self> {
        Ok(Self::new(FileConfigSource::discover(install_dir)?))
    }

    /// Create a loader with an explicit environment lookup.
    #[must_use]
    pub fn with_env<F>(source: impl ConfigSource + 'static, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
            env: Box::new(env),
            cached: OnceCell::new(),
        }
    }

    /// Load the directories, reading the source on first call only.
    pub fn load(&self) -> Result<&PearDirectories> {
        self.cached.get_or_try_init(|| {
            let text = self.source.read()?;
            let value = Decoder::new().parse(strip_comments(&text))?;
            let mut dirs = PearDirectories::from_value(&value)?;
            dirs.apply_env(|var| (self.env)(var));
            info!(
                source = %self.source.describe(),
                php_dir = %dirs.php_dir.display(),
                "pear configuration loaded"
            );
            Ok(dirs)
        })
    }

    /// Drop the cached layout so the next [`load`](Self::load) re-reads it.
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            debug!(source = %self.source.describe(), "pear configuration invalidated");
        }
    }
}
