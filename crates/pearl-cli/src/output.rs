//! Terminal output helpers.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {message}", style("Error:").red().bold());
}

/// Print a section header.
pub fn header(title: &str) {
    println!("{}", style(title).cyan().bold());
}

/// Print a dimmed label followed by a value.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {} {value}", style(format!("{label}:")).dim());
}

/// Print a label with an optional value, skipping absent ones.
pub fn optional_field(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

/// Serialize `value` as pretty JSON to stdout.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let text = sonic_rs::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}
