//! Waypoint CLI application.
//!
//! Command-line front end for the waypoint exchange planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::{PlannerBuilder, PlanningConfig};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        config,
        today,
        no_color,
        command,
    } = Args::parse();

    let config = PlanningConfig::load(config.as_deref()).context("Failed to load configuration")?;

    let mut builder = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_config(config);
    if let Some(today) = today {
        builder = builder.with_today(today);
    }
    let planner = builder.build().await.context("Failed to initialize planner")?;

    let cli = Cli::new(planner, TerminalRenderer::new(!no_color));

    info!("Waypoint started");

    match command {
        Some(Seed { command }) => cli.handle_seed_command(command).await,
        Some(Elaborate { command }) => cli.handle_elaborate_command(command).await,
        Some(Project { command }) => cli.handle_project_command(command).await,
        None => cli.list_seeds().await,
    }
}
