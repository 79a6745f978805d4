use serde::{Deserialize, Serialize};

use super::strategy::MoveContext;
use crate::game::{capturable, Destination, Location, NodeId};

/// Furthest an enemy can be behind a cell and still reach it in one roll.
const THREAT_RANGE: u32 = 6;

/// Facts about one candidate move, shared by the heuristic strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveAnalysis {
    pub destination: Destination,
    /// Moves a token out of base.
    pub leaves_base: bool,
    pub arrives: bool,
    /// Steps from leaving base to arrival covered once the move is made.
    pub progress: u32,
    /// Steps still to go after the move.
    pub remaining: u32,
    /// Enemy tokens sent to base by landing.
    pub captures: usize,
    pub lands_safe: bool,
    /// Sum of `7 - d` over enemy tokens `d` steps behind the destination,
    /// `1 <= d <= 6`, measured along each enemy's own path. Zero on safe
    /// cells.
    pub threat: u32,
    /// Mover's tokens already arrived before the move.
    pub pieces_home: usize,
}

impl MoveAnalysis {
    /// `None` when the token does not exist or cannot use `roll`.
    pub fn analyze(ctx: &MoveContext<'_>, token: usize, roll: u8) -> Option<Self> {
        let board = ctx.board();
        let mover = ctx.mover();
        let color = mover.color();
        let current = mover.token(token)?;
        let destination = current.simulate_move(board, roll)?;

        let full = board.full_path_len(color);
        let (remaining, captures, lands_safe, threat) = match destination {
            Destination::Home => (0, 0, false, 0),
            Destination::Node(node) => {
                let remaining = board.steps_to_arrival(node, color).unwrap_or(0);
                let safe = board.is_safe(node);
                let captures = capturable(board, ctx.players(), node, color);
                let threat = if safe { 0 } else { threat_at(ctx, node) };
                (remaining, captures, safe, threat)
            }
        };

        Some(MoveAnalysis {
            destination,
            leaves_base: current.location() == Location::InBase,
            arrives: destination == Destination::Home,
            progress: full.saturating_sub(remaining),
            remaining,
            captures,
            lands_safe,
            threat,
            pieces_home: mover.tokens_arrived(),
        })
    }
}

fn threat_at(ctx: &MoveContext<'_>, node: NodeId) -> u32 {
    let board = ctx.board();
    let color = ctx.color();
    ctx.players()
        .iter()
        .filter(|p| p.color() != color)
        .flat_map(|p| p.tokens().iter())
        .filter_map(|t| {
            let from = t.node()?;
            board.distance_along(from, node, t.color(), THREAT_RANGE)
        })
        .map(|d| THREAT_RANGE + 1 - d)
        .sum()
}

/// Weights combining a [`MoveAnalysis`] into a score.
///
/// Each strategy has its own defaults, so a weight table in a config file
/// must list every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicWeights {
    pub base_exit: f64,
    pub progress: f64,
    pub capture: f64,
    pub safe_landing: f64,
    pub threat: f64,
    pub arrival: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            base_exit: 400.0,
            progress: 2.0,
            capture: 150.0,
            safe_landing: 100.0,
            threat: 12.0,
            arrival: 300.0,
        }
    }
}

impl HeuristicWeights {
    /// Weighted sum, with each capture worth `capture * capture_multiplier`.
    pub fn score(&self, analysis: &MoveAnalysis, capture_multiplier: f64) -> f64 {
        let mut score = self.progress * f64::from(analysis.progress);
        if analysis.leaves_base {
            score += self.base_exit;
        }
        if analysis.arrives {
            score += self.arrival;
        }
        if analysis.lands_safe {
            score += self.safe_landing;
        }
        score += self.capture * capture_multiplier * analysis.captures as f64;
        score -= self.threat * f64::from(analysis.threat);
        score
    }

    /// Every weight finite and non-negative.
    pub fn validate(&self, section: &str) -> Result<(), String> {
        let fields = [
            ("base_exit", self.base_exit),
            ("progress", self.progress),
            ("capture", self.capture),
            ("safe_landing", self.safe_landing),
            ("threat", self.threat),
            ("arrival", self.arrival),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{section}.{name} must be finite and >= 0, got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Color, Game, Player};

    fn on(node: usize) -> Location {
        Location::OnNode(NodeId::new(node))
    }

    fn table() -> Game {
        let players = Color::ALL
            .iter()
            .map(|&c| Player::human(c.name(), c))
            .collect();
        Game::standard(players).unwrap()
    }

    #[test]
    fn test_base_exit() {
        let game = table();
        let ctx = game.move_context(0);
        let analysis = MoveAnalysis::analyze(&ctx, 0, 6).unwrap();
        assert!(analysis.leaves_base);
        assert!(analysis.lands_safe);
        assert_eq!(analysis.progress, 1);
        assert_eq!(analysis.remaining, 57);
        assert_eq!(analysis.threat, 0);
        assert!(MoveAnalysis::analyze(&ctx, 0, 5).is_none());
    }

    #[test]
    fn test_capture_and_threat() {
        let mut game = table();
        game.place_token(0, 0, on(10)).unwrap();
        // Red victim on 14, Yellow attacker three behind it on 11.
        game.place_token(3, 0, on(14)).unwrap();
        game.place_token(2, 0, on(11)).unwrap();
        let ctx = game.move_context(0);
        let analysis = MoveAnalysis::analyze(&ctx, 0, 4).unwrap();
        assert_eq!(analysis.destination, Destination::Node(NodeId::new(14)));
        assert_eq!(analysis.captures, 1);
        assert!(!analysis.lands_safe);
        assert_eq!(analysis.threat, 4);
    }

    #[test]
    fn test_threat_follows_enemy_path() {
        let mut game = table();
        // Green turns into its home stretch at 11 and never reaches 14.
        game.place_token(1, 0, on(11)).unwrap();
        game.place_token(0, 0, on(12)).unwrap();
        let board = Board::standard();
        assert_eq!(board.successor(NodeId::new(11), Color::Green), Some(NodeId::new(58)));

        let ctx = game.move_context(0);
        let analysis = MoveAnalysis::analyze(&ctx, 0, 2).unwrap();
        assert_eq!(analysis.threat, 0);
    }

    #[test]
    fn test_no_threat_on_safe_cell() {
        let mut game = table();
        game.place_token(0, 0, on(5)).unwrap();
        game.place_token(2, 0, on(4)).unwrap();
        let ctx = game.move_context(0);
        let analysis = MoveAnalysis::analyze(&ctx, 0, 3).unwrap();
        assert!(analysis.lands_safe);
        assert_eq!(analysis.threat, 0);
    }

    #[test]
    fn test_arrival() {
        let mut game = table();
        game.place_token(0, 0, on(57)).unwrap();
        game.place_token(0, 1, Location::Arrived).unwrap();
        let ctx = game.move_context(0);
        let analysis = MoveAnalysis::analyze(&ctx, 0, 1).unwrap();
        assert!(analysis.arrives);
        assert_eq!(analysis.remaining, 0);
        assert_eq!(analysis.progress, 58);
        assert_eq!(analysis.pieces_home, 1);
        assert!(MoveAnalysis::analyze(&ctx, 1, 1).is_none());
    }

    #[test]
    fn test_weighted_score() {
        let weights = HeuristicWeights {
            base_exit: 10.0,
            progress: 1.0,
            capture: 100.0,
            safe_landing: 5.0,
            threat: 2.0,
            arrival: 50.0,
        };
        let analysis = MoveAnalysis {
            destination: Destination::Node(NodeId::new(14)),
            leaves_base: false,
            arrives: false,
            progress: 20,
            remaining: 38,
            captures: 2,
            lands_safe: false,
            threat: 3,
            pieces_home: 0,
        };
        assert_eq!(weights.score(&analysis, 1.0), 20.0 + 200.0 - 6.0);
        assert_eq!(weights.score(&analysis, 1.5), 20.0 + 300.0 - 6.0);
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(HeuristicWeights::default().validate("balanced").is_ok());
        let bad = HeuristicWeights {
            threat: -1.0,
            ..HeuristicWeights::default()
        };
        let err = bad.validate("defensive").unwrap_err();
        assert!(err.contains("defensive.threat"));
        let nan = HeuristicWeights {
            capture: f64::NAN,
            ..HeuristicWeights::default()
        };
        assert!(nan.validate("aggressive").is_err());
    }
}
