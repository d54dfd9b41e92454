#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates one cellmaze stage and prints it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cellmaze_core::GridCoord;
use cellmaze_system_map_controller::MapController;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod ascii;
mod config;

/// Command-line arguments accepted by the `cellmaze` binary.
#[derive(Debug, Parser)]
#[command(name = "cellmaze", version, about = "Generates a maze stage and prints it as text")]
struct CliArgs {
    /// TOML file holding the map configuration.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Difficulty level selecting the path kind and anchors.
    #[arg(long, default_value_t = 0)]
    difficulty: u32,
    /// Stage number selecting the path width.
    #[arg(long, default_value_t = 0)]
    stage: u32,
    /// Seed overriding the configured one.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the cellmaze command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let mut config = config::load(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    tracing::debug!(?config, "loaded map config");

    let mut controller =
        MapController::from_config(&config).context("failed to set up the map controller")?;
    let map = controller
        .generate(args.difficulty, args.stage)
        .with_context(|| {
            format!(
                "failed to generate difficulty {} stage {}",
                args.difficulty, args.stage
            )
        })?;

    let centre = (map.report.path_width - 1) / 2;
    let spawn_cell = GridCoord::new(
        map.report.start.column() + centre,
        map.report.start.row() + centre,
    );

    println!("{}", ascii::render(controller.grid(), Some(spawn_cell)));
    println!("spawn: ({:.3}, {:.3})", map.spawn.x, map.spawn.y);
    println!("turns: {}", map.turns());
    Ok(())
}
