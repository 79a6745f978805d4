use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ludo_engine::ai::parse_lineup;
use ludo_engine::config::AppConfig;
use ludo_engine::game::{Color, Die, Game, Location, Player, TurnOutcome};
use ludo_engine::simulation::play_game_with;

/// Play one automated Ludo game and print every turn.
#[derive(Parser)]
#[command(name = "ludo_engine", about = "Play an automated game of Ludo")]
struct Cli {
    /// Strategy per seat in turn order (A=aggressive, D=defensive, B=balanced, R=random)
    #[arg(long, default_value = "ADBR")]
    lineup: String,

    /// Seed for the die and random strategies
    #[arg(long)]
    seed: Option<u64>,

    /// Abandon the game after this many turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let lineup = parse_lineup(&cli.lineup).map_err(anyhow::Error::msg)?;
    if lineup.is_empty() || lineup.len() > Color::ALL.len() {
        bail!("lineup '{}' must seat 1 to 4 strategies", cli.lineup);
    }

    let players = lineup
        .iter()
        .zip(Color::ALL)
        .enumerate()
        .map(|(seat, (&kind, color))| {
            let seed = cli.seed.map(|s| s.wrapping_add(seat as u64 + 1));
            Player::automated(format!("{color} ({kind})"), color, kind.build(&config, seed))
        })
        .collect();
    let board = config.build_board().context("building board")?;
    let mut game = Game::new(board, players).context("seating players")?;
    let mut die = match cli.seed {
        Some(seed) => Die::seeded(seed),
        None => Die::new(),
    };
    let max_turns = cli.max_turns.unwrap_or(config.simulation.max_turns);

    let names: Vec<String> = game.players().iter().map(|p| p.name().to_string()).collect();
    let summary = play_game_with(&mut game, &mut die, max_turns, |roll, outcome| {
        print_turn(&names, roll, outcome);
    })
    .context("playing game")?;

    println!();
    match summary.winner {
        Some(seat) => println!("{} wins after {} turns", names[seat], summary.turns),
        None => println!("No winner after {} turns", summary.turns),
    }
    for (seat, name) in names.iter().enumerate() {
        println!(
            "  {:<22} moves {:>4}  captures {:>3}",
            name, summary.moves[seat], summary.captures[seat]
        );
    }
    Ok(())
}

fn print_turn(names: &[String], roll: u8, outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::NoLegalMove { player, .. } => {
            println!("{:<22} rolls {roll}: no move", names[*player]);
        }
        TurnOutcome::Moved { record, won } => {
            let mut line = format!(
                "{:<22} rolls {roll}: token {} {} -> {}",
                names[record.player],
                record.token,
                describe(record.from),
                describe(record.to)
            );
            for capture in &record.captures {
                line.push_str(&format!(", captures {} token {}", capture.color, capture.token));
            }
            if *won {
                line.push_str(", wins");
            }
            println!("{line}");
        }
    }
}

fn describe(location: Location) -> String {
    match location {
        Location::InBase => "base".to_string(),
        Location::OnNode(node) => node.to_string(),
        Location::Arrived => "home".to_string(),
    }
}
