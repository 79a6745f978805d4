//! Automated token choice: the strategy trait, shared move analysis and the
//! heuristic players.

mod aggressive;
mod analysis;
mod balanced;
mod defensive;
mod random;
mod strategy;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use aggressive::AggressiveStrategy;
pub use analysis::{HeuristicWeights, MoveAnalysis};
pub use balanced::{BalancedStrategy, BalancedWeights};
pub use defensive::DefensiveStrategy;
pub use random::RandomStrategy;
pub use strategy::{MoveContext, MoveStrategy};

use crate::config::AppConfig;

/// Named strategy, as used in lineups and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Aggressive,
    Defensive,
    Balanced,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Aggressive,
        StrategyKind::Defensive,
        StrategyKind::Balanced,
        StrategyKind::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Aggressive => "Aggressive",
            StrategyKind::Defensive => "Defensive",
            StrategyKind::Balanced => "Balanced",
            StrategyKind::Random => "Random",
        }
    }

    /// One-letter code used in compact lineups such as `"AADD"`.
    pub fn code(self) -> char {
        match self {
            StrategyKind::Aggressive => 'A',
            StrategyKind::Defensive => 'D',
            StrategyKind::Balanced => 'B',
            StrategyKind::Random => 'R',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.code() == code.to_ascii_uppercase())
    }

    /// Build the strategy with weights from `config`. `seed` only affects
    /// [`StrategyKind::Random`].
    pub fn build(self, config: &AppConfig, seed: Option<u64>) -> Box<dyn MoveStrategy> {
        match self {
            StrategyKind::Aggressive => Box::new(AggressiveStrategy::new(config.aggressive)),
            StrategyKind::Defensive => Box::new(DefensiveStrategy::new(config.defensive)),
            StrategyKind::Balanced => Box::new(BalancedStrategy::new(config.balanced)),
            StrategyKind::Random => match seed {
                Some(seed) => Box::new(RandomStrategy::seeded(seed)),
                None => Box::new(RandomStrategy::new()),
            },
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return StrategyKind::from_code(c).ok_or_else(|| format!("unknown strategy code '{c}'"));
        }
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown strategy '{s}'"))
    }
}

/// Parse a compact lineup such as `"ADBB"`, one strategy per seat.
pub fn parse_lineup(lineup: &str) -> Result<Vec<StrategyKind>, String> {
    lineup
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| StrategyKind::from_code(c).ok_or_else(|| format!("unknown strategy code '{c}' in lineup {lineup}")))
        .collect()
}
