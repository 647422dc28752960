//! `pear list-channels` table parsing.

use crate::error::{Result, StructuralError};
use serde::Serialize;

/// Number of header lines before the first channel row.
const HEADER_LINES: usize = 3;

/// One row of the channel table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelListing {
    /// Channel name, e.g. `pear.php.net`.
    pub name: String,
    /// Suggested alias, e.g. `pear`.
    pub alias: Option<String>,
    /// Free-text summary.
    pub summary: Option<String>,
}

impl ChannelListing {
    /// Whether `name` matches this channel's name or alias.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.alias.as_deref() == Some(name)
    }
}

/// Parse the output of `pear list-channels`.
///
/// ```text
/// Registered Channels:
/// ====================
/// Channel      Alias   Summary
/// pear.php.net pear    PHP Extension and Application Repository
/// __uri        __uri   Pseudo-channel for static packages
/// ```
///
/// Empty lines are ignored. The pseudo channel `__uri`, indented
/// continuation rows and repeated header rows are skipped.
pub fn parse_channel_list(output: &str) -> Result<Vec<ChannelListing>> {
    let mut lines = output.trim().lines().filter(|line| !line.trim().is_empty());
    for _ in 0..HEADER_LINES {
        lines.next().ok_or(StructuralError::MissingChannelHeader)?;
    }

    Ok(lines
        .filter(|row| {
            !(row.starts_with(char::is_whitespace)
                || row.starts_with("__uri")
                || row.starts_with("CHANNEL"))
        })
        .map(parse_row)
        .collect())
}

fn parse_row(row: &str) -> ChannelListing {
    let (name, rest) = split_word(row);
    let (alias, summary) = split_word(rest);
    ChannelListing {
        name: name.to_string(),
        alias: (!alias.is_empty()).then(|| alias.to_string()),
        summary: (!summary.is_empty()).then(|| summary.to_string()),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim_start()),
        None => (text, ""),
    }
}
