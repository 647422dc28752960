//! PEAR directory layout.

use crate::error::{ConfigError, Result};
use pearl_serialized::SerializedValue;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Configuration keys and the environment variables overriding them.
pub const DIRECTORY_KEYS: [(&str, &str); 9] = [
    ("php_dir", "PHP_PEAR_INSTALL_DIR"),
    ("bin_dir", "PHP_PEAR_BIN_DIR"),
    ("doc_dir", "PHP_PEAR_DOC_DIR"),
    ("data_dir", "PHP_PEAR_DATA_DIR"),
    ("cfg_dir", "PHP_PEAR_CFG_DIR"),
    ("www_dir", "PHP_PEAR_WWW_DIR"),
    ("test_dir", "PHP_PEAR_TEST_DIR"),
    ("temp_dir", "PHP_PEAR_TEMP_DIR"),
    ("download_dir", "PHP_PEAR_DOWNLOAD_DIR"),
];

/// Directories of a PEAR installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PearDirectories {
    /// PHP library files.
    pub php_dir: PathBuf,
    /// Executables.
    pub bin_dir: PathBuf,
    /// Documentation.
    pub doc_dir: PathBuf,
    /// Data files.
    pub data_dir: PathBuf,
    /// Configuration files.
    pub cfg_dir: PathBuf,
    /// Web files.
    pub www_dir: PathBuf,
    /// Package tests.
    pub test_dir: PathBuf,
    /// Temporary files.
    pub temp_dir: PathBuf,
    /// Downloaded archives.
    pub download_dir: PathBuf,
}

impl PearDirectories {
    /// Read the directory keys from a decoded configuration array.
    pub fn from_value(value: &SerializedValue) -> Result<Self> {
        if value.entries().is_none() {
            return Err(ConfigError::NotAnArray);
        }

        let mut dirs = Self::default();
        for (key, _) in DIRECTORY_KEYS {
            let entry = value.get(key).ok_or(ConfigError::MissingKey(key))?;
            let path = entry.as_str().ok_or_else(|| ConfigError::InvalidValue {
                key,
                found: entry.to_string(),
            })?;
            if let Some(slot) = dirs.slot_mut(key) {
                *slot = PathBuf::from(path);
            }
        }
        Ok(dirs)
    }

    /// Override directories from environment variables.
    ///
    /// `lookup` maps a variable name to its value; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, var) in DIRECTORY_KEYS {
            let Some(value) = lookup(var).filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Some(slot) = self.slot_mut(key) {
                debug!(key, var, value = %value, "directory overridden from environment");
                *slot = PathBuf::from(value);
            }
        }
    }

    /// Look up a directory by configuration key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PathBuf> {
        Some(match key {
            "php_dir" => &self.php_dir,
            "bin_dir" => &self.bin_dir,
            "doc_dir" => &self.doc_dir,
            "data_dir" => &self.data_dir,
            "cfg_dir" => &self.cfg_dir,
            "www_dir" => &self.www_dir,
            "test_dir" => &self.test_dir,
            "temp_dir" => &self.temp_dir,
            "download_dir" => &self.download_dir,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut PathBuf> {
        Some(match key {
            "php_dir" => &mut self.php_dir,
            "bin_dir" => &mut self.bin_dir,
            "doc_dir" => &mut self.doc_dir,
            "data_dir" => &mut self.data_dir,
            "cfg_dir" => &mut self.cfg_dir,
            "www_dir" => &mut self.www_dir,
            "test_dir" => &mut self.test_dir,
            "temp_dir" => &mut self.temp_dir,
            "download_dir" => &mut self.download_dir,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(entries: &[(&str, SerializedValue)]) -> SerializedValue {
        SerializedValue::Array(
            entries
                .iter()
                .map(|(k, v)| (SerializedValue::Str((*k).to_string()), v.clone()))
                .collect(),
        )
    }

    fn full() -> SerializedValue {
        config(
            &DIRECTORY_KEYS
                .map(|(key, _)| (key, SerializedValue::Str(format!("/pear/{key}")))),
        )
    }

    #[test]
    fn reads_all_keys() {
        let dirs = PearDirectories::from_value(&full()).unwrap();
        assert_eq!(dirs.php_dir, PathBuf::from("/pear/php_dir"));
        assert_eq!(dirs.download_dir, PathBuf::from("/pear/download_dir"));
        assert_eq!(dirs.get("cfg_dir"), Some(&PathBuf::from("/pear/cfg_dir")));
        assert_eq!(dirs.get("nope"), None);
    }

    #[test]
    fn missing_key() {
        let value = config(&[("php_dir", SerializedValue::Str("/p".into()))]);
        assert!(matches!(
            PearDirectories::from_value(&value),
            Err(ConfigError::MissingKey("bin_dir"))
        ));
    }

    #[test]
    fn non_string_value() {
        let mut entries: Vec<_> = DIRECTORY_KEYS
            .map(|(key, _)| (key, SerializedValue::Str(format!("/pear/{key}"))))
            .to_vec();
        entries[0].1 = SerializedValue::Int(3);
        assert!(matches!(
            PearDirectories::from_value(&config(&entries)),
            Err(ConfigError::InvalidValue { key: "php_dir", .. })
        ));
    }

    #[test]
    fn not_an_array() {
        assert!(matches!(
            PearDirectories::from_value(&SerializedValue::Null),
            Err(ConfigError::NotAnArray)
        ));
    }

    #[test]
    fn environment_overrides() {
        let mut dirs = PearDirectories::from_value(&full()).unwrap();
        dirs.apply_env(|var| match var {
            "PHP_PEAR_BIN_DIR" => Some("/usr/local/bin".to_string()),
            "PHP_PEAR_DOC_DIR" => Some(String::new()),
            _ => None,
        });
        assert_eq!(dirs.bin_dir, PathBuf::from("/usr/local/bin"));
        assert_eq!(dirs.doc_dir, PathBuf::from("/pear/doc_dir"));
    }
}
