use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ludo_engine::config::AppConfig;
use ludo_engine::simulation::Simulator;

/// Compare strategies by playing batches of automated games.
#[derive(Parser)]
#[command(name = "simulate", about = "Run Ludo strategy comparison games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override games played per lineup
    #[arg(long)]
    games: Option<usize>,

    /// Override the turn limit per game
    #[arg(long)]
    max_turns: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Lineups to play instead of the configured ones, e.g. AADD
    #[arg(long = "lineup")]
    lineups: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.simulation.games_per_lineup = games;
    }
    if let Some(max_turns) = cli.max_turns {
        config.simulation.max_turns = max_turns;
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }
    if !cli.lineups.is_empty() {
        config.simulation.lineups = cli.lineups;
    }
    config.validate().context("invalid configuration")?;

    let simulator = Simulator::new(config).context("building simulator")?;
    let report = simulator.run().context("running simulation")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_table());
    }
    Ok(())
}
