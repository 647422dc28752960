//! Channels command implementation.

use super::Cli;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use pearl_report::parse_channel_list;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the channels command.
#[derive(Args, Debug)]
pub struct ChannelsArgs {
    /// File holding `pear list-channels` output
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the channels command.
pub fn run(cli: &Cli, args: &ChannelsArgs) -> Result<()> {
    info!(file = %args.file.display(), "running channels command");

    let text = cli.read(&args.file)?;
    let channels = parse_channel_list(&text)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    if args.json {
        return output::json(&channels);
    }

    output::header(&format!("{} channels", channels.len()));
    for channel in &channels {
        println!(
            "  {:<30} {:<10} {}",
            style(&channel.name).green(),
            channel.alias.as_deref().unwrap_or("-"),
            style(channel.summary.as_deref().unwrap_or_default()).dim()
        );
    }
    Ok(())
}
