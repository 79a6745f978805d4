use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::episode::GameSummary;
use crate::ai::StrategyKind;

/// Totals for one strategy across every seat it occupied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrategyStats {
    /// Seats played; a lineup with the strategy twice counts twice per game.
    pub games: usize,
    pub wins: usize,
    /// Seats in games that hit the turn limit.
    pub unfinished: usize,
    win_turns: usize,
    win_captures: usize,
}

impl StrategyStats {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64
    }

    pub fn avg_turns_per_win(&self) -> f64 {
        if self.wins == 0 {
            return 0.0;
        }
        self.win_turns as f64 / self.wins as f64
    }

    pub fn avg_captures_per_win(&self) -> f64 {
        if self.wins == 0 {
            return 0.0;
        }
        self.win_captures as f64 / self.wins as f64
    }
}

/// Outcome counts for one lineup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupResult {
    pub lineup: Vec<StrategyKind>,
    pub games: usize,
    pub unfinished: usize,
    pub wins_by_seat: Vec<usize>,
}

impl LineupResult {
    pub fn new(lineup: Vec<StrategyKind>) -> Self {
        let seats = lineup.len();
        LineupResult {
            lineup,
            games: 0,
            unfinished: 0,
            wins_by_seat: vec![0; seats],
        }
    }

    /// Compact form such as `"AADD"`.
    pub fn code(&self) -> String {
        self.lineup.iter().map(|k| k.code()).collect()
    }
}

/// Everything a simulation run collected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub total_games: usize,
    pub lineups: Vec<LineupResult>,
    pub strategies: BTreeMap<StrategyKind, StrategyStats>,
}

impl SimulationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished game into the totals.
    pub fn record_game(&mut self, lineup: &[StrategyKind], summary: &GameSummary) {
        self.total_games += 1;

        let entry = match self.lineups.iter().position(|r| r.lineup == lineup) {
            Some(i) => &mut self.lineups[i],
            None => {
                self.lineups.push(LineupResult::new(lineup.to_vec()));
                let last = self.lineups.len() - 1;
                &mut self.lineups[last]
            }
        };
        entry.games += 1;
        match summary.winner {
            Some(seat) => entry.wins_by_seat[seat] += 1,
            None => entry.unfinished += 1,
        }

        for (seat, &kind) in lineup.iter().enumerate() {
            let stats = self.strategies.entry(kind).or_default();
            stats.games += 1;
            match summary.winner {
                Some(winner) if winner == seat => {
                    stats.wins += 1;
                    stats.win_turns += summary.turns;
                    stats.win_captures += summary.captures.get(seat).copied().unwrap_or(0);
                }
                Some(_) => {}
                None => stats.unfinished += 1,
            }
        }
    }

    pub fn stats(&self, kind: StrategyKind) -> Option<&StrategyStats> {
        self.strategies.get(&kind)
    }

    /// Plain-text summary table.
    pub fn to_table(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total games played: {}", self.total_games)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<11} {:>6} {:>6} {:>8} {:>12} {:>15} {:>11}",
            "Strategy", "Seats", "Wins", "Win %", "Turns/win", "Captures/win", "Unfinished"
        )?;
        for (kind, stats) in &self.strategies {
            writeln!(
                f,
                "{:<11} {:>6} {:>6} {:>7.1}% {:>12.1} {:>15.2} {:>11}",
                kind.name(),
                stats.games,
                stats.wins,
                stats.win_rate() * 100.0,
                stats.avg_turns_per_win(),
                stats.avg_captures_per_win(),
                stats.unfinished
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:<8} {:>6} {:>11}  Wins by seat", "Lineup", "Games", "Unfinished")?;
        for result in &self.lineups {
            let wins: Vec<String> = result.wins_by_seat.iter().map(|w| w.to_string()).collect();
            writeln!(
                f,
                "{:<8} {:>6} {:>11}  {}",
                result.code(),
                result.games,
                result.unfinished,
                wins.join(" / ")
            )?;
        }
        Ok(())
    }
}
