//! Plan command implementation.

use super::Cli;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use pearl_core::DependencyCoordinate;
use pearl_planner::{
    DependencyPlanner, DryRunInstaller, InMemoryChannelRegistry, InstallOptions, MemoryRepository,
};
use pearl_report::parse_channel_list;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the plan command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// JSON repository document describing the available projects
    pub repository: PathBuf,

    /// Root package as group:artifact:version
    pub package: String,

    /// Also plan PEAR core packages (PEAR, Archive_Tar, ...)
    #[arg(long)]
    pub include_core: bool,

    /// `pear list-channels` output listing already registered channels
    #[arg(long)]
    pub channels: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    plan: &'a pearl_planner::InstallPlan,
    new_channels: Vec<&'a str>,
    commands: &'a [String],
}

/// Run the plan command.
pub fn run(cli: &Cli, args: &PlanArgs) -> Result<()> {
    info!(package = %args.package, "running plan command");

    let root = DependencyCoordinate::parse(&args.package)?;
    let repository = MemoryRepository::from_json(&cli.read(&args.repository)?)
        .with_context(|| format!("failed to load {}", args.repository.display()))?;

    let mut registry = match &args.channels {
        Some(path) => {
            let listings = parse_channel_list(&cli.read(path)?)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            InMemoryChannelRegistry::from_listings(&listings)
        }
        None => InMemoryChannelRegistry::new(),
    };
    let known_before = registry.len();

    let plan = DependencyPlanner::new(&repository, &repository)
        .plan(&root, !args.include_core, &mut registry)
        .with_context(|| format!("failed to plan installation of {root}"))?;

    let mut installer = DryRunInstaller::new();
    plan.execute(&mut installer, InstallOptions::default())?;

    let new_channels: Vec<&str> = registry.channels()[known_before..]
        .iter()
        .map(|c| c.name.as_str())
        .collect();

    if args.json {
        return output::json(&PlanOutput {
            plan: &plan,
            new_channels,
            commands: installer.commands(),
        });
    }

    output::header(&format!("Install plan for {root}"));
    for channel in &new_channels {
        println!("  {} channel-discover {channel}", style("+").green());
    }
    for (index, entry) in plan.entries().iter().enumerate() {
        let pear_version = entry
            .pear_version()
            .with_context(|| format!("{} has no PEAR version", entry.coordinate))?;
        println!(
            "  {:>3}. {} {} {}",
            index + 1,
            style(&entry.coordinate).green(),
            style(format!("(pear {pear_version})")).yellow(),
            style(entry.file.display()).dim()
        );
    }
    println!();
    for command in installer.commands() {
        println!("  {} pear {command}", style("$").dim());
    }
    Ok(())
}
