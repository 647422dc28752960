//! Scanner for `pear info` / `pear remote-info` report text.
//!
//! A report is a two-column table: a label padded to a fixed column,
//! followed by the value. Values may continue on following lines that start
//! with whitespace. The scanner tracks which multi-line section is active and
//! routes continuation lines to it.

use crate::cursor::LineCursor;
use crate::error::{Result, StructuralError};
use crate::report::{Dependency, License, Maintainer, PackageReport};
use tracing::{debug, trace};

const PROLOG_RELEASE_VERSION: &str = "Release Version ";
const PROLOG_SUMMARY: &str = "Summary ";
const PROLOG_DESCRIPTION: &str = "Description ";
const PROLOG_MAINTAINERS: &str = "Maintainers ";
const PROLOG_RELEASE_DATE: &str = "Release Date";
const PROLOG_LICENSE: &str = "License ";
const PROLOG_RELEASE_NOTES: &str = "Release Notes ";
const PROLOG_NAME: &str = "Name ";
const PROLOG_REQUIRED: &str = "Required Dependencies ";
const PROLOG_OPTIONAL: &str = "Optional Dependencies ";
const PROLOG_PACKAGE: &str = "Package ";
const PROLOG_PACKAGE_VERSION: &str = "Version ";
const PROLOG_PACKAGE_VERSIONS: &str = "Versions ";

/// Section that continuation lines belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Unknown,
    Description,
    Summary,
    ReleaseNotes,
    Maintainers,
    License,
    RequiredDeps,
    OptionalDeps,
}

#[derive(Debug, Clone, Copy)]
enum DependencyKind {
    Required,
    Optional,
}

/// Parses report text into a [`PackageReport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportScanner;

impl ReportScanner {
    /// Scan `text`.
    ///
    /// `channel_hint` is the channel the report was requested from; it is
    /// only used to recover the version from an `ABOUT CHANNEL/PKG-VERSION`
    /// heading when the report has no `Release Version` line.
    pub fn parse(text: &str, channel_hint: &str) -> Result<PackageReport> {
        let mut scan = Scan {
            cursor: LineCursor::new(text.trim()),
            section: Section::Unknown,
            report: PackageReport::default(),
        };
        let first_line = scan.run()?;
        let mut report = scan.report;
        if let Some(first_line) = first_line {
            recover_version(&mut report, first_line, channel_hint);
        }

        debug!(
            name = report.name.as_deref().unwrap_or_default(),
            version = report.version.as_deref().unwrap_or_default(),
            required = report.required_dependencies.len(),
            optional = report.optional_dependencies.len(),
            "scanned package report"
        );
        Ok(report)
    }
}

struct Scan<'a> {
    cursor: LineCursor<'a>,
    section: Section,
    report: PackageReport,
}

impl<'a> Scan<'a> {
    fn run(&mut self) -> Result<Option<&'a str>> {
        let mut first_line = None;
        while let Some(raw) = self.cursor.next_line() {
            let line = raw.trim();
            if first_line.is_none() {
                first_line = Some(line);
            }
            self.line(raw, line)?;
        }
        Ok(first_line)
    }

    fn line(&mut self, raw: &'a str, line: &'a str) -> Result<()> {
        if let Some(rest) = raw.strip_prefix(PROLOG_RELEASE_VERSION) {
            self.section = Section::Unknown;
            self.report.version = rest.split_whitespace().next().map(str::to_string);
        } else if let Some(rest) = raw
            .strip_prefix(PROLOG_NAME)
            .or_else(|| raw.strip_prefix(PROLOG_PACKAGE))
        {
            self.section = Section::Unknown;
            self.report.name = Some(rest.trim().to_string());
        } else if let Some(rest) = raw.strip_prefix(PROLOG_REQUIRED) {
            self.section = Section::RequiredDeps;
            self.dependency(rest.trim(), DependencyKind::Required)?;
        } else if let Some(rest) = raw.strip_prefix(PROLOG_OPTIONAL) {
            self.section = Section::OptionalDeps;
            self.dependency(rest.trim(), DependencyKind::Optional)?;
        } else if let Some(rest) = raw.strip_prefix(PROLOG_DESCRIPTION) {
            self.section = Section::Description;
            self.report.description = Some(rest.trim().to_string());
        } else if let Some(rest) = raw.strip_prefix(PROLOG_LICENSE) {
            self.section = Section::License;
            self.report.licenses.push(parse_license(rest.trim()));
        } else if let Some(rest) = raw.strip_prefix(PROLOG_MAINTAINERS) {
            self.section = Section::Maintainers;
            let maintainer = self.maintainer(rest.trim(), line)?;
            self.report.maintainers.push(maintainer);
        } else if let Some(rest) = raw.strip_prefix(PROLOG_SUMMARY) {
            self.section = Section::Summary;
            self.report.summary = Some(rest.trim().to_string());
        } else if let Some(rest) = raw.strip_prefix(PROLOG_RELEASE_DATE) {
            self.section = Section::Unknown;
            self.report.release_date = Some(rest.trim().to_string());
        } else if let Some(rest) = raw.strip_prefix(PROLOG_RELEASE_NOTES) {
            self.section = Section::ReleaseNotes;
            self.report.release_notes = Some(rest.trim().to_string());
        } else if raw.starts_with(char::is_whitespace) {
            self.continuation(line)?;
        } else {
            if self.section != Section::Unknown {
                trace!(
                    section = ?self.section,
                    line_number = self.cursor.line_number(),
                    line,
                    "section ended"
                );
            }
            self.section = Section::Unknown;
        }
        Ok(())
    }

    fn continuation(&mut self, line: &'a str) -> Result<()> {
        match self.section {
            Section::RequiredDeps => self.dependency(line, DependencyKind::Required)?,
            Section::OptionalDeps => self.dependency(line, DependencyKind::Optional)?,
            Section::Description => append(&mut self.report.description, line),
            Section::Summary => append(&mut self.report.summary, line),
            Section::ReleaseNotes => append(&mut self.report.release_notes, line),
            Section::Maintainers => {
                let maintainer = self.maintainer(line, line)?;
                match self.report.maintainers.last_mut() {
                    // A bare `<email> (role)` line completes a name-only record.
                    Some(last)
                        if maintainer.name.is_none()
                            && maintainer.email.is_some()
                            && last.email.is_none() =>
                    {
                        last.email = maintainer.email;
                        last.role = maintainer.role;
                    }
                    _ => self.report.maintainers.push(maintainer),
                }
            }
            Section::License => {
                let license = parse_license(line);
                match self.report.licenses.last_mut() {
                    Some(last) if license.name.is_none() && last.url.is_none() => {
                        last.url = license.url;
                    }
                    _ => self.report.licenses.push(license),
                }
            }
            Section::Unknown => {}
        }
        Ok(())
    }

    /// Parse `Name <email> (role)`, `<email> (role)` or a plain name.
    ///
    /// A role whose closing parenthesis is not on this line is continued
    /// from the following indented lines.
    fn maintainer(&mut self, text: &str, line: &str) -> Result<Maintainer> {
        let Some((name, email, rest)) = text.split_once('<').and_then(|(name, tail)| {
            tail.split_once('>')
                .map(|(email, rest)| (name.trim(), email.trim(), rest.trim()))
        }) else {
            return Ok(Maintainer {
                name: non_empty(text),
                ..Maintainer::default()
            });
        };

        let mut maintainer = Maintainer {
            name: non_empty(name),
            email: Some(email.to_string()),
            role: None,
        };
        if rest.is_empty() {
            return Ok(maintainer);
        }
        let Some(role) = rest.strip_prefix('(') else {
            return Err(StructuralError::MalformedMaintainer(line.to_string()));
        };

        let mut role = role.to_string();
        while !role.ends_with(')') && self.cursor.has_more() {
            match self.cursor.next_line() {
                Some(next) if next.starts_with(char::is_whitespace) => {
                    role.push(' ');
                    role.push_str(next.trim());
                }
                Some(_) => {
                    self.cursor.push_back();
                    break;
                }
                None => break,
            }
        }
        if role.ends_with(')') {
            role.pop();
        }
        maintainer.role = non_empty(&role);
        Ok(maintainer)
    }

    /// Parse one `Package <channel/name>` entry and its optional version line.
    fn dependency(&mut self, token: &str, kind: DependencyKind) -> Result<()> {
        let Some(name) = strip_label(token, PROLOG_PACKAGE.trim_end()) else {
            trace!(line = token, "ignoring non-package dependency line");
            return Ok(());
        };
        let name = if name.is_empty() {
            self.cursor.next_line().map(str::trim).unwrap_or_default()
        } else {
            name
        };

        let version_constraint = self.version_constraint();
        let dependency = Dependency::from_name(name, version_constraint)?;
        trace!(dependency = %dependency, ?kind, "dependency");
        match kind {
            DependencyKind::Required => self.report.required_dependencies.push(dependency),
            DependencyKind::Optional => self.report.optional_dependencies.push(dependency),
        }
        Ok(())
    }

    /// Read the `Version`/`Versions` line following a package line.
    ///
    /// One empty line is skipped. Any other line is pushed back.
    fn version_constraint(&mut self) -> Option<String> {
        let mut line = self.cursor.next_line()?.trim();
        if line.is_empty() {
            line = self.cursor.next_line()?.trim();
        }

        let constraint = if let Some(rest) = line.strip_prefix(PROLOG_PACKAGE_VERSIONS) {
            rest.split('-').next()
        } else if let Some(rest) = line.strip_prefix(PROLOG_PACKAGE_VERSION) {
            rest.split(' ').next()
        } else {
            self.cursor.push_back();
            return None;
        };
        constraint.and_then(non_empty)
    }
}

fn append(buffer: &mut Option<String>, line: &str) {
    let buffer = buffer.get_or_insert_with(String::new);
    buffer.push('\n');
    buffer.push_str(line);
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Strip `label` when it is followed by whitespace or ends the token.
fn strip_label<'t>(token: &'t str, label: &str) -> Option<&'t str> {
    token
        .strip_prefix(label)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .map(str::trim)
}

/// Parse `Name (url)`, `(url)` or a plain name.
fn parse_license(text: &str) -> License {
    if let Some(url) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        return License {
            name: None,
            url: non_empty(url),
        };
    }
    if let Some((name, url)) = text
        .strip_suffix(')')
        .and_then(|t| t.rsplit_once(" ("))
    {
        return License {
            name: non_empty(name),
            url: non_empty(url),
        };
    }
    License {
        name: non_empty(text),
        url: None,
    }
}

/// Take the version from an `ABOUT CHANNEL/PKG-VERSION` or `ABOUT PKG-VERSION`
/// heading when no `Release Version` line was present.
fn recover_version(report: &mut PackageReport, first_line: &str, channel: &str) {
    if report.version.as_deref().is_some_and(|v| !v.is_empty()) {
        return;
    }
    let Some(name) = report.name.as_deref() else {
        return;
    };

    let prefixes = [
        format!("ABOUT {channel}/{name}-"),
        format!("ABOUT {name}-"),
    ];
    let recovered = prefixes.iter().find_map(|prefix| {
        first_line
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .and_then(|_| non_empty(&first_line[prefix.len()..]))
    });
    if let Some(version) = recovered {
        trace!(%version, "version recovered from report heading");
        report.version = Some(version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODESNIFFER: &str = "\
ABOUT PEAR.PHP.NET/PHP_CODESNIFFER-1.3.0
========================================
Release Type          PEAR-style PHP-based Package
Name                  PHP_CodeSniffer
Channel               pear.php.net
Summary               PHP_CodeSniffer tokenises PHP, JavaScript and CSS
                      files and detects violations of a defined set of
                      coding standards.
Description           PHP_CodeSniffer is a PHP5 script that tokenises
                      PHP, JavaScript and CSS files.
Maintainers           Greg Sherwood <gsherwood@squiz.net> (lead)
                      Marc McIntyre <mmcintyre@squiz.net> (developer,
                      inactive)
Release Date          2011-03-17 11:23:58
Release Version       1.3.0 (stable)
API Version           1.3.0 (stable)
License               BSD License
                      (http://www.opensource.org/licenses/bsd-license.php)
Release Notes         - Added support for the PHP 5.3 __DIR__ constant
                      - Fixed bug #18291
Required Dependencies Package pear.php.net/PEAR
                      Version 1.4.0 or newer
                      Package pear.php.net/Console_Getopt
Optional Dependencies Package
                      pear.php.net/PHP_Timer
                      Versions 1.0.0-1.9.9
";

    fn scan(text: &str) -> PackageReport {
        ReportScanner::parse(text, "pear.php.net").unwrap()
    }

    #[test]
    fn single_line_fields() {
        let report = scan(CODESNIFFER);
        assert_eq!(report.name.as_deref(), Some("PHP_CodeSniffer"));
        assert_eq!(report.version.as_deref(), Some("1.3.0"));
        assert_eq!(report.release_date.as_deref(), Some("2011-03-17 11:23:58"));
    }

    #[test]
    fn multi_line_fields() {
        let report = scan(CODESNIFFER);
        assert_eq!(
            report.summary.as_deref(),
            Some(
                "PHP_CodeSniffer tokenises PHP, JavaScript and CSS\n\
                 files and detects violations of a defined set of\n\
                 coding standards."
            )
        );
        assert_eq!(
            report.description.as_deref(),
            Some("PHP_CodeSniffer is a PHP5 script that tokenises\nPHP, JavaScript and CSS files.")
        );
        assert_eq!(
            report.release_notes.as_deref(),
            Some("- Added support for the PHP 5.3 __DIR__ constant\n- Fixed bug #18291")
        );
    }

    #[test]
    fn maintainers() {
        let report = scan(CODESNIFFER);
        assert_eq!(
            report.maintainers,
            [
                Maintainer {
                    name: Some("Greg Sherwood".into()),
                    email: Some("gsherwood@squiz.net".into()),
                    role: Some("lead".into()),
                },
                Maintainer {
                    name: Some("Marc McIntyre".into()),
                    email: Some("mmcintyre@squiz.net".into()),
                    role: Some("developer, inactive".into()),
                },
            ]
        );
    }

    #[test]
    fn license_url_on_continuation_line() {
        let report = scan(CODESNIFFER);
        assert_eq!(
            report.licenses,
            [License {
                name: Some("BSD License".into()),
                url: Some("http://www.opensource.org/licenses/bsd-license.php".into()),
            }]
        );
    }

    #[test]
    fn required_dependencies_with_and_without_version() {
        let report = scan(CODESNIFFER);
        let required = &report.required_dependencies;
        assert_eq!(required.len(), 2);
        assert_eq!(required[0].full_name(), "pear.php.net/PEAR");
        assert_eq!(required[0].version_constraint.as_deref(), Some("1.4.0"));
        assert_eq!(required[1].full_name(), "pear.php.net/Console_Getopt");
        assert_eq!(required[1].version_constraint, None);
    }

    #[test]
    fn optional_dependency_name_on_next_line() {
        let report = scan(CODESNIFFER);
        assert_eq!(
            report.optional_dependencies,
            [Dependency {
                channel: "pear.php.net".into(),
                package: "PHP_Timer".into(),
                version_constraint: Some("1.0.0".into()),
            }]
        );
    }

    #[test]
    fn version_line_after_empty_line() {
        let report = scan(
            "Name Foo\n\
             Required Dependencies Package pear.php.net/Bar\n\
             \n\
             Version 2.1.0 or newer",
        );
        assert_eq!(report.required_dependencies.len(), 1);
        assert_eq!(
            report.required_dependencies[0].version_constraint.as_deref(),
            Some("2.1.0")
        );
    }

    #[test]
    fn version_from_channel_heading() {
        let report = scan("ABOUT PEAR.PHP.NET/ARCHIVE_TAR-1.3.7\nName  Archive_Tar");
        assert_eq!(report.version.as_deref(), Some("1.3.7"));
    }

    #[test]
    fn version_from_plain_heading() {
        let report = ReportScanner::parse("ABOUT ARCHIVE_TAR-1.3.7\nName  Archive_Tar", "pear").unwrap();
        assert_eq!(report.version.as_deref(), Some("1.3.7"));
    }

    #[test]
    fn release_version_beats_heading() {
        let report = scan("ABOUT PEAR.PHP.NET/ARCHIVE_TAR-1.3.7\nName Archive_Tar\nRelease Version 1.3.8 (stable)");
        assert_eq!(report.version.as_deref(), Some("1.3.8"));
    }

    #[test]
    fn unlabelled_line_ends_section() {
        let report = scan("Description first\nChannel pear.php.net\n    stray");
        assert_eq!(report.description.as_deref(), Some("first"));
    }

    #[test]
    fn maintainer_email_then_name_lines() {
        let report = scan("Maintainers Jane Doe\n            <jane@example.com> (lead)\n            John Roe");
        assert_eq!(report.maintainers.len(), 2);
        assert_eq!(report.maintainers[0].email.as_deref(), Some("jane@example.com"));
        assert_eq!(report.maintainers[0].role.as_deref(), Some("lead"));
        assert_eq!(report.maintainers[1].name.as_deref(), Some("John Roe"));
    }

    #[test]
    fn unterminated_role_at_end_of_report() {
        let report = scan("Maintainers Jane Doe <jane@example.com> (lead,\n            inactive");
        assert_eq!(report.maintainers.len(), 1);
        assert_eq!(report.maintainers[0].role.as_deref(), Some("lead, inactive"));
    }

    #[test]
    fn malformed_maintainer() {
        let err = ReportScanner::parse("Maintainers <jane@example.com> lead", "pear").unwrap_err();
        assert!(matches!(err, StructuralError::MalformedMaintainer(_)));
    }

    #[test]
    fn dependency_without_channel() {
        let err = ReportScanner::parse("Required Dependencies Package Console_Getopt", "pear").unwrap_err();
        assert_eq!(
            err,
            StructuralError::IllegalDependencyName("Console_Getopt".into())
        );
    }

    #[test]
    fn non_package_dependency_lines_are_skipped() {
        let report = scan(
            "Required Dependencies PHP Version 5.1.0\n\
             \x20                     Package pear.php.net/PEAR",
        );
        assert_eq!(report.required_dependencies.len(), 1);
    }

    #[test]
    fn empty_report() {
        assert_eq!(scan("   "), PackageReport::default());
    }

    #[test]
    fn report_serializes_to_json() {
        let json = sonic_rs::to_string(&scan(CODESNIFFER)).unwrap();
        assert!(json.contains("\"name\":\"PHP_CodeSniffer\""));
        assert!(json.contains("\"version_constraint\":null"));
    }
}
