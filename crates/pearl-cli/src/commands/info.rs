//! Info command implementation.

use super::Cli;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use pearl_core::{is_pear_core_package, pear_to_maven_version};
use pearl_report::{Dependency, PackageReport, ReportScanner};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the info command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// File holding `pear info` or `pear remote-info` output
    pub file: PathBuf,

    /// Channel the report was taken from
    #[arg(short, long, default_value = "pear.php.net")]
    pub channel: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the info command.
pub fn run(cli: &Cli, args: &InfoArgs) -> Result<()> {
    info!(file = %args.file.display(), channel = %args.channel, "running info command");

    let text = cli.read(&args.file)?;
    let report = ReportScanner::parse(&text, &args.channel)
        .with_context(|| format!("failed to scan {}", args.file.display()))?;

    if args.json {
        return output::json(&report);
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &PackageReport) {
    println!();
    output::header(report.name.as_deref().unwrap_or("(unnamed package)"));
    println!();
    output::optional_field("Version", report.version.as_deref());
    output::optional_field("Release date", report.release_date.as_deref());
    output::optional_field("Summary", report.summary.as_deref());

    for maintainer in &report.maintainers {
        let mut line = maintainer.name.clone().unwrap_or_default();
        if let Some(email) = &maintainer.email {
            line = format!("{line} <{email}>").trim().to_string();
        }
        if let Some(role) = &maintainer.role {
            line = format!("{line} ({role})");
        }
        output::field("Maintainer", line);
    }
    for license in &report.licenses {
        match (&license.name, &license.url) {
            (Some(name), Some(url)) => output::field("License", format!("{name} ({url})")),
            (Some(name), None) => output::field("License", name),
            (None, Some(url)) => output::field("License", url),
            (None, None) => {}
        }
    }

    print_dependencies("Required dependencies", &report.required_dependencies);
    print_dependencies("Optional dependencies", &report.optional_dependencies);
}

fn print_dependencies(title: &str, dependencies: &[Dependency]) {
    if dependencies.is_empty() {
        return;
    }
    println!();
    println!("  {}", style(format!("{title}:")).dim());
    for dependency in dependencies {
        println!("    {}", dependency_line(dependency));
    }
}

fn dependency_line(dependency: &Dependency) -> String {
    let mut line = style(dependency.full_name()).green().to_string();
    if let Some(version) = &dependency.version_constraint {
        line = format!(
            "{line} {} {}",
            style(format!(">= {version}")).yellow(),
            style(format!("(maven {})", pear_to_maven_version(version))).dim()
        );
    }
    if is_pear_core_package(&dependency.channel, &dependency.package) {
        line = format!("{line} {}", style("[core]").cyan());
    }
    line
}
