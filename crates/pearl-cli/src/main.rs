//! Pearl CLI - PEAR package metadata tooling.
//!
//! Decodes PEAR configuration and serialized values, scans `pear info`
//! reports and channel listings, and plans installations from a Maven-style
//! repository.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod output;

use clap::Parser;
use commands::{Cli, Commands};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 if cli.quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    if cli.no_ansi {
        console::set_colors_enabled(false);
    }

    match run_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run_command(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Decode(args) => commands::decode::run(cli, args)?,
        Commands::Info(args) => commands::info::run(cli, args)?,
        Commands::Channels(args) => commands::channels::run(cli, args)?,
        Commands::Config(args) => commands::config::run(cli, args)?,
        Commands::Plan(args) => commands::plan::run(cli, args)?,
    }
    Ok(ExitCode::SUCCESS)
}
