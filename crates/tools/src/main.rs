use std::path::PathBuf;

use anyhow::{Context, Result};
use bilebio_core::{Action, Game, SimConfig};
use bilebio_tools::config_file::{load_config, write_config_atomic};
use bilebio_tools::logging::init_tracing;
use bilebio_tools::render::{RunSummary, render_map};
use bilebio_tools::script::parse_walk;
use bilebio_tools::seed::{SeedChoice, generate_runtime_seed};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Run a seeded cave-growth simulation headlessly", long_about = None)]
struct Args {
    /// Run seed; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of rest turns to simulate
    #[arg(short, long, default_value_t = 30)]
    turns: u32,
    /// TOML file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Player moves in vi-keys (hjklyubn, '.' waits), one per turn
    #[arg(short, long, default_value = "")]
    walk: String,
    /// Level to start on
    #[arg(long, default_value_t = 0)]
    level: usize,
    /// Print the summary as JSON instead of the map
    #[arg(long)]
    json: bool,
    /// Write the effective settings to this TOML file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };
    if let Some(width) = args.width {
        config.region.width = width;
    }
    if let Some(height) = args.height {
        config.region.height = height;
    }

    if let Some(path) = &args.dump_config {
        config.validate().context("command-line overrides produced an invalid config")?;
        write_config_atomic(&config, path)?;
        println!("Wrote settings to {}", path.display());
        return Ok(());
    }

    let seed = SeedChoice::resolve(args.seed, generate_runtime_seed());
    let walk = parse_walk(&args.walk)?;
    let mut game =
        Game::new(seed.value(), config).context("command-line overrides produced an invalid config")?;
    for _ in 0..args.level {
        game.advance_level();
    }
    info!(seed = seed.value(), generated = seed.was_generated(), turns = args.turns, "starting run");

    for turn in 0..args.turns as usize {
        if game.is_over() {
            break;
        }
        if let Some(Some(direction)) = walk.get(turn) {
            game.player_act(*direction, Action::Move);
        }
        game.rest_act();
    }

    let summary = RunSummary::capture(&game);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary).context("failed to encode summary")?);
    } else {
        print!("{}", render_map(&game));
        print!("{}", summary.to_text());
    }
    Ok(())
}
