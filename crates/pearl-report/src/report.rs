//! Structured package metadata extracted from a report.

use crate::error::{Result, StructuralError};
use serde::Serialize;
use std::fmt;

/// A package maintainer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Maintainer {
    /// Display name.
    pub name: Option<String>,
    /// Email address, without the angle brackets.
    pub email: Option<String>,
    /// Role such as `lead` or `developer`.
    pub role: Option<String>,
}

/// A package license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct License {
    /// License name.
    pub name: Option<String>,
    /// License URL, without the parentheses.
    pub url: Option<String>,
}

/// A dependency on another package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Channel hosting the package.
    pub channel: String,
    /// Package name within the channel.
    pub package: String,
    /// Minimum version, if the report gave one.
    pub version_constraint: Option<String>,
}

impl Dependency {
    /// Build a dependency from a `channel/package` name.
    ///
    /// Empty segments are ignored, so `pear.php.net//PEAR` is accepted;
    /// anything after the second segment is dropped.
    pub fn from_name(name: &str, version_constraint: Option<String>) -> Result<Self> {
        let mut segments = name.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some(channel), Some(package)) => Ok(Self {
                channel: channel.to_string(),
                package: package.to_string(),
                version_constraint,
            }),
            _ => Err(StructuralError::IllegalDependencyName(name.to_string())),
        }
    }

    /// `channel/package`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.channel, self.package)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel, self.package)?;
        if let Some(version) = &self.version_constraint {
            write!(f, " >= {version}")?;
        }
        Ok(())
    }
}

/// Package metadata scanned from an info report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    /// Package name.
    pub name: Option<String>,
    /// Release version.
    pub version: Option<String>,
    /// Release date as printed.
    pub release_date: Option<String>,
    /// One-line (or multi-line) summary.
    pub summary: Option<String>,
    /// Long description, lines joined with `\n`.
    pub description: Option<String>,
    /// Release notes, lines joined with `\n`.
    pub release_notes: Option<String>,
    /// Maintainers in report order.
    pub maintainers: Vec<Maintainer>,
    /// Licenses in report order.
    pub licenses: Vec<License>,
    /// Dependencies that must be installed.
    pub required_dependencies: Vec<Dependency>,
    /// Dependencies that may be installed.
    pub optional_dependencies: Vec<Dependency>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn dependency_name_split() {
        let dep = Dependency::from_name("pear.php.net/Console_Getopt", Some("1.2".into())).unwrap();
        assert_eq!(dep.channel, "pear.php.net");
        assert_eq!(dep.package, "Console_Getopt");
        assert_eq!(dep.full_name(), "pear.php.net/Console_Getopt");
        assert_eq!(dep.to_string(), "pear.php.net/Console_Getopt >= 1.2");
    }

    #[test]
    fn dependency_without_channel() {
        assert_eq!(
            Dependency::from_name("Console_Getopt", None),
            Err(StructuralError::IllegalDependencyName("Console_Getopt".into()))
        );
        assert!(Dependency::from_name("/", None).is_err());
    }

    #[test_case("pear.phpunit.de/PHPUnit", "pear.phpunit.de", "PHPUnit" ; "plain")]
    #[test_case("/pear.php.net/PEAR", "pear.php.net", "PEAR" ; "leading slash")]
    #[test_case("pear.php.net//XML_Util", "pear.php.net", "XML_Util" ; "doubled slash")]
    fn dependency_name_segments(name: &str, channel: &str, package: &str) {
        let dep = Dependency::from_name(name, None).unwrap();
        assert_eq!(dep.channel, channel);
        assert_eq!(dep.package, package);
        assert!(dep.version_constraint.is_none());
    }
}
