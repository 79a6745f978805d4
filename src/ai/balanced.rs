use serde::{Deserialize, Serialize};

use super::analysis::{HeuristicWeights, MoveAnalysis};
use super::strategy::{MoveContext, MoveStrategy};

/// Weights for [`BalancedStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancedWeights {
    #[serde(flatten)]
    pub base: HeuristicWeights,
    /// Extra capture weight per arrived token, as a fraction of `capture`.
    #[serde(default = "default_progress_scale")]
    pub progress_scale: f64,
}

fn default_progress_scale() -> f64 {
    0.5
}

impl Default for BalancedWeights {
    fn default() -> Self {
        BalancedWeights {
            base: HeuristicWeights::default(),
            progress_scale: default_progress_scale(),
        }
    }
}

/// Middle-of-the-road weights, growing bolder about captures as more of
/// its own tokens reach home.
#[derive(Debug, Clone)]
pub struct BalancedStrategy {
    weights: BalancedWeights,
}

impl BalancedStrategy {
    pub fn new(weights: BalancedWeights) -> Self {
        BalancedStrategy { weights }
    }

    pub fn weights(&self) -> &BalancedWeights {
        &self.weights
    }

    fn capture_multiplier(&self, pieces_home: usize) -> f64 {
        1.0 + self.weights.progress_scale * pieces_home as f64
    }
}

impl Default for BalancedStrategy {
    fn default() -> Self {
        Self::new(BalancedWeights::default())
    }
}

impl MoveStrategy for BalancedStrategy {
    fn score(&self, ctx: &MoveContext<'_>, token: usize, roll: u8) -> f64 {
        match MoveAnalysis::analyze(ctx, token, roll) {
            Some(analysis) => {
                let multiplier = self.capture_multiplier(analysis.pieces_home);
                self.weights.base.score(&analysis, multiplier)
            }
            None => f64::NEG_INFINITY,
        }
    }

    fn name(&self) -> &str {
        "Balanced"
    }

    fn clone_strategy(&self) -> Box<dyn MoveStrategy> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Color, Game, Location, NodeId, Player};

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
    fn test_capture_weight_grows_with_pieces_home() {
        let mut game = table();
        game.place_token(0, 0, on(14)).unwrap();
        game.place_token(3, 0, on(17)).unwrap();
        let strategy = BalancedStrategy::default();

        let before = strategy.score(&game.move_context(0), 0, 3);
        game.place_token(0, 1, Location::Arrived).unwrap();
        game.place_token(0, 2, Location::Arrived).unwrap();
        let after = strategy.score(&game.move_context(0), 0, 3);

        // Two tokens home add 0.5 * 150 each to the one capture.
        assert!((after - before - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_capture_multiplier() {
        let strategy = BalancedStrategy::default();
        assert_eq!(strategy.capture_multiplier(0), 1.0);
        assert_eq!(strategy.capture_multiplier(3), 2.5);
    }

    #[test]
    fn test_arrived_token_never_selected() {
        let mut game = table();
        game.place_token(0, 0, Location::Arrived).unwrap();
        game.place_token(0, 1, on(20)).unwrap();
        let mut strategy = BalancedStrategy::default();
        let ctx = game.move_context(0);
        assert_eq!(strategy.score(&ctx, 0, 1), f64::NEG_INFINITY);
        assert_eq!(strategy.select_token(&ctx, 1), Some(1));
    }

    #[test]
    fn test_weights_deserialize_flat() {
        let table = r#"
base_exit = 400.0
progress = 2.0
capture = 90.0
safe_landing = 100.0
threat = 12.0
arrival = 300.0
"#;
        let weights: BalancedWeights = toml::from_str(table).unwrap();
        assert_eq!(weights.base.capture, 90.0);
        assert_eq!(weights.progress_scale, 0.5);

        let scaled: BalancedWeights =
            toml::from_str(&format!("{table}progress_scale = 1.0\n")).unwrap();
        assert_eq!(scaled.progress_scale, 1.0);
    }

    #[test]
    fn test_partial_weights_rejected() {
        assert!(toml::from_str::<BalancedWeights>("capture = 90.0").is_err());
    }
}
