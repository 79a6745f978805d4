//! Strategy comparison: automated games over fixed lineups and the
//! statistics collected from them.

pub mod episode;
pub mod metrics;
pub mod runner;

pub use episode::{play_game, play_game_with, GameSummary};
pub use metrics::{LineupResult, SimulationReport, StrategyStats};
pub use runner::{SimulationConfig, Simulator};
