//! Packages every PEAR installation already ships with.
//!
//! When installing into an existing PEAR installation these are never
//! re-installed; the planner skips them when asked to ignore core packages.

/// Maven group id under which the PEAR core packages are published.
pub const CORE_GROUP: &str = "net.php";

/// PEAR channels (name and alias) that host the core packages.
pub const CORE_CHANNELS: [&str; 2] = ["pear.php.net", "pear"];

/// Names of the core packages.
pub const CORE_PACKAGES: [&str; 5] = [
    "Archive_Tar",
    "Console_Getopt",
    "PEAR",
    "Structures_Graph",
    "XML_Util",
];

/// Whether a Maven `(group, artifact)` pair names a PEAR core package.
#[must_use]
pub fn is_maven_core_package(group: &str, artifact: &str) -> bool {
    group == CORE_GROUP && CORE_PACKAGES.contains(&artifact)
}

/// Whether a PEAR `(channel, package)` pair names a core package.
#[must_use]
pub fn is_pear_core_package(channel: &str, package: &str) -> bool {
    CORE_CHANNELS.contains(&channel) && CORE_PACKAGES.contains(&package)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maven_core() {
        assert!(is_maven_core_package("net.php", "PEAR"));
        assert!(is_maven_core_package("net.php", "XML_Util"));
        assert!(!is_maven_core_package("net.php", "PHPUnit"));
        assert!(!is_maven_core_package("org.phpmaven", "PEAR"));
    }

    #[test]
    fn pear_core() {
        assert!(is_pear_core_package("pear", "Archive_Tar"));
        assert!(is_pear_core_package("pear.php.net", "Console_Getopt"));
        assert!(!is_pear_core_package("pear.phpunit.de", "PEAR"));
    }
}
