use std::path::Path;

use crate::ai::{parse_lineup, AggressiveStrategy, BalancedWeights, DefensiveStrategy, HeuristicWeights};
use crate::error::{BoardError, ConfigError};
use crate::game::{Board, BoardBuilder, DEFAULT_HOME_STRETCH_LEN};
use crate::simulation::SimulationConfig;

/// Board layout options.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub home_stretch_len: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            home_stretch_len: DEFAULT_HOME_STRETCH_LEN,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub aggressive: HeuristicWeights,
    pub defensive: HeuristicWeights,
    pub balanced: BalancedWeights,
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            aggressive: AggressiveStrategy::default_weights(),
            defensive: DefensiveStrategy::default_weights(),
            balanced: BalancedWeights::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Build the board this configuration describes.
    pub fn build_board(&self) -> Result<Board, BoardError> {
        BoardBuilder::new()
            .home_stretch_len(self.board.home_stretch_len)
            .build()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(5..=6).contains(&self.board.home_stretch_len) {
            return Err(ConfigError::Validation(
                "board.home_stretch_len must be 5 or 6".into(),
            ));
        }

        self.aggressive
            .validate("aggressive")
            .map_err(ConfigError::Validation)?;
        self.defensive
            .validate("defensive")
            .map_err(ConfigError::Validation)?;
        self.balanced
            .base
            .validate("balanced")
            .map_err(ConfigError::Validation)?;
        if !self.balanced.progress_scale.is_finite() || self.balanced.progress_scale < 0.0 {
            return Err(ConfigError::Validation(
                "balanced.progress_scale must be finite and >= 0".into(),
            ));
        }

        let sim = &self.simulation;
        if sim.games_per_lineup == 0 {
            return Err(ConfigError::Validation(
                "simulation.games_per_lineup must be > 0".into(),
            ));
        }
        if sim.max_turns == 0 {
            return Err(ConfigError::Validation(
                "simulation.max_turns must be > 0".into(),
            ));
        }
        if sim.log_interval == 0 {
            return Err(ConfigError::Validation(
                "simulation.log_interval must be > 0".into(),
            ));
        }
        if sim.lineups.is_empty() {
            return Err(ConfigError::Validation(
                "simulation.lineups must not be empty".into(),
            ));
        }
        for lineup in &sim.lineups {
            let seats = parse_lineup(lineup).map_err(ConfigError::Validation)?;
            if seats.len() != 4 {
                return Err(ConfigError::Validation(format!(
                    "simulation.lineups entry '{lineup}' must seat 4 strategies"
                )));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
