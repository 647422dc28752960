//! Config command implementation.

use super::Cli;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use pearl_config::{DIRECTORY_KEYS, PearConfigLoader};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// PEAR install directory holding pear.conf or pear.ini
    pub install_dir: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the config command.
pub fn run(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let install_dir = cli.resolve(&args.install_dir);
    info!(dir = %install_dir.display(), "running config command");

    let loader = PearConfigLoader::for_install_dir(&install_dir)?;
    let dirs = loader
        .load()
        .with_context(|| format!("failed to load configuration from {}", install_dir.display()))?;

    if args.json {
        return output::json(dirs);
    }

    output::header(&format!("PEAR installation at {}", install_dir.display()));
    for (key, _) in DIRECTORY_KEYS {
        if let Some(path) = dirs.get(key) {
            output::field(key, path.display());
        }
    }
    Ok(())
}
