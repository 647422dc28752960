//! CLI commands for Pearl.

pub mod channels;
pub mod config;
pub mod decode;
pub mod info;
pub mod plan;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Pearl - PEAR package metadata tooling
#[derive(Parser, Debug)]
#[command(name = "pearl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory for relative paths
    #[arg(short = 'd', long, global = true)]
    pub working_dir: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    pub no_ansi: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Resolve `path` against `--working-dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Read a text file given on the command line.
    pub fn read(&self, path: &Path) -> Result<String> {
        let path = self.resolve(path);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a PHP serialized value
    Decode(decode::DecodeArgs),

    /// Scan `pear info` output
    Info(info::InfoArgs),

    /// Parse `pear list-channels` output
    Channels(channels::ChannelsArgs),

    /// Show the directory layout of a PEAR installation
    Config(config::ConfigArgs),

    /// Plan the installation of a package and its dependencies
    Plan(plan::PlanArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["pearl", "-vv", "channels", "list.txt"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Channels(_)));
    }

    #[test]
    fn relative_paths_use_working_dir() {
        let cli = Cli::parse_from(["pearl", "-d", "/srv/pear", "config", "."]);
        assert_eq!(cli.resolve(Path::new("pear.conf")), PathBuf::from("/srv/pear/pear.conf"));
        assert_eq!(cli.resolve(Path::new("/etc/pear.conf")), PathBuf::from("/etc/pear.conf"));
    }
}
