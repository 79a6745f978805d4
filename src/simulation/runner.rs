use serde::{Deserialize, Serialize};

use super::episode::play_game;
use super::metrics::SimulationReport;
use crate::ai::{parse_lineup, StrategyKind};
use crate::config::AppConfig;
use crate::error::SimulationError;
use crate::game::{Board, Color, Die, Game, Player};

/// Settings for a strategy comparison run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub games_per_lineup: usize,
    /// Turns after which a game is abandoned as unfinished.
    pub max_turns: usize,
    /// Fixes dice and random strategies for a reproducible run.
    pub seed: Option<u64>,
    /// Log progress every this many games within a lineup.
    pub log_interval: usize,
    /// Four-letter lineups, one strategy code per seat in turn order.
    pub lineups: Vec<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games_per_lineup: 20,
            max_turns: 2000,
            seed: None,
            log_interval: 5,
            lineups: ["AAAA", "DDDD", "BBBB", "AADD", "ADBB", "DDBB"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Runs batches of automated games and collects a [`SimulationReport`].
pub struct Simulator {
    config: AppConfig,
    board: Board,
}

impl Simulator {
    /// Fails if `config` does not validate.
    pub fn new(config: AppConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let board = config.build_board()?;
        Ok(Simulator { config, board })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Play every configured lineup.
    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        let sim = &self.config.simulation;
        let mut die = match sim.seed {
            Some(seed) => Die::seeded(seed),
            None => Die::new(),
        };
        let mut report = SimulationReport::new();

        for code in &sim.lineups {
            let lineup = parse_lineup(code).map_err(SimulationError::InvalidLineup)?;
            self.run_lineup(&lineup, &mut die, &mut report)?;
        }

        log::info!("simulation finished: {} games", report.total_games);
        Ok(report)
    }

    /// Play `games_per_lineup` games of one lineup into `report`.
    pub fn run_lineup(
        &self,
        lineup: &[StrategyKind],
        die: &mut Die,
        report: &mut SimulationReport,
    ) -> Result<(), SimulationError> {
        let sim = &self.config.simulation;
        let code: String = lineup.iter().map(|k| k.code()).collect();
        log::info!("lineup {code}: {} games", sim.games_per_lineup);

        for game_index in 0..sim.games_per_lineup {
            let mut game = self.new_game(lineup, game_index)?;
            let summary = play_game(&mut game, die, sim.max_turns)?;

            match summary.winner {
                Some(seat) => log::debug!(
                    "lineup {code} game {}: {} won in {} turns with {} captures",
                    game_index + 1,
                    game.players()[seat].name(),
                    summary.turns,
                    summary.captures[seat]
                ),
                None => log::debug!(
                    "lineup {code} game {}: no winner after {} turns",
                    game_index + 1,
                    summary.turns
                ),
            }
            report.record_game(lineup, &summary);

            if (game_index + 1) % sim.log_interval == 0 {
                log::info!(
                    "lineup {code}: {}/{} games played",
                    game_index + 1,
                    sim.games_per_lineup
                );
            }
        }
        Ok(())
    }

    /// Seat `lineup` in color order on a fresh game.
    pub fn new_game(&self, lineup: &[StrategyKind], game_index: usize) -> Result<Game, SimulationError> {
        if lineup.len() != Color::ALL.len() {
            return Err(SimulationError::LineupSize(lineup.len()));
        }
        let players = lineup
            .iter()
            .zip(Color::ALL)
            .enumerate()
            .map(|(seat, (&kind, color))| {
                let seed = self
                    .config
                    .simulation
                    .seed
                    .map(|s| s.wrapping_add((game_index * 4 + seat) as u64));
                Player::automated(
                    format!("{color} ({kind})"),
                    color,
                    kind.build(&self.config, seed),
                )
            })
            .collect();
        Ok(Game::new(self.board.clone(), players)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::ai::StrategyKind::{Aggressive as A, Balanced as B, Defensive as D, Random as R};

    fn small_config(lineups: &[&str]) -> AppConfig {
        let mut config = AppConfig::default();
        config.simulation.games_per_lineup = 3;
        config.simulation.max_turns = 20_000;
        config.simulation.seed = Some(17);
        config.simulation.lineups = lineups.iter().map(|s| s.to_string()).collect();
        config
    }

    #[test]
    fn test_default_lineups() {
        let config = SimulationConfig::default();
        assert_eq!(config.lineups.len(), 6);
        assert_eq!(config.games_per_lineup, 20);
    }

    #[test]
    fn test_run_collects_every_game() {
        let simulator = Simulator::new(small_config(&["ADBR", "AADD"])).unwrap();
        let report = simulator.run().unwrap();
        assert_eq!(report.total_games, 6);
        assert_eq!(report.lineups.len(), 2);
        assert_eq!(report.stats(A).unwrap().games, 9);
        assert_eq!(report.stats(D).unwrap().games, 9);
        assert_eq!(report.stats(B).unwrap().games, 3);
        assert_eq!(report.stats(R).unwrap().games, 3);

        let wins: usize = report.strategies.values().map(|s| s.wins).sum();
        let unfinished: usize = report.lineups.iter().map(|l| l.unfinished).sum();
        assert_eq!(wins + unfinished, 6);
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let a = Simulator::new(small_config(&["ADBR"])).unwrap().run().unwrap();
        let b = Simulator::new(small_config(&["ADBR"])).unwrap().run().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_lineups() {
        assert!(matches!(
            Simulator::new(small_config(&["AXDD"])),
            Err(SimulationError::Config(_))
        ));
        assert!(matches!(
            Simulator::new(small_config(&["ADB"])),
            Err(SimulationError::Config(_))
        ));

        let simulator = Simulator::new(small_config(&["ADBR"])).unwrap();
        assert!(matches!(
            simulator.new_game(&[A, D, B], 0),
            Err(SimulationError::LineupSize(3))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = small_config(&["ADBR"]);
        config.simulation.log_interval = 0;
        assert!(matches!(
            Simulator::new(config),
            Err(SimulationError::Config(ConfigError::Validation(_)))
        ));

        let mut config = small_config(&["ADBR"]);
        config.simulation.games_per_lineup = 0;
        assert!(Simulator::new(config).is_err());
    }

    #[test]
    fn test_new_game_names_seats() {
        let simulator = Simulator::new(small_config(&["ADBR"])).unwrap();
        let game = simulator.new_game(&[A, D, B, R], 0).unwrap();
        assert_eq!(game.players()[0].name(), "Blue (Aggressive)");
        assert_eq!(game.players()[3].color(), Color::Red);
        assert_eq!(game.players()[3].strategy_name(), Some("Random"));
    }

    #[test]
    fn test_shorter_stretch_board() {
        let mut config = small_config(&["BBBB"]);
        config.board.home_stretch_len = 5;
        let simulator = Simulator::new(config).unwrap();
        let report = simulator.run().unwrap();
        assert_eq!(report.total_games, 3);
    }
}
