use super::analysis::{HeuristicWeights, MoveAnalysis};
use super::strategy::{MoveContext, MoveStrategy};

/// Favors knocking enemy tokens back to base over everything else.
#[derive(Debug, Clone)]
pub struct AggressiveStrategy {
    weights: HeuristicWeights,
}

impl AggressiveStrategy {
    pub fn new(weights: HeuristicWeights) -> Self {
        AggressiveStrategy { weights }
    }

    pub fn default_weights() -> HeuristicWeights {
        HeuristicWeights {
            base_exit: 500.0,
            progress: 2.0,
            capture: 600.0,
            safe_landing: 20.0,
            threat: 5.0,
            arrival: 300.0,
        }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Default for AggressiveStrategy {
    fn default() -> Self {
        Self::new(Self::default_weights())
    }
}

impl MoveStrategy for AggressiveStrategy {
    fn score(&self, ctx: &MoveContext<'_>, token: usize, roll: u8) -> f64 {
        match MoveAnalysis::analyze(ctx, token, roll) {
            Some(analysis) => self.weights.score(&analysis, 1.0),
            None => f64::NEG_INFINITY,
        }
    }

    fn name(&self) -> &str {
        "Aggressive"
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
    fn test_prefers_capture_over_safety() {
        let mut game = table();
        // Token 0 can capture on 17, token 1 can reach safe 21.
        game.place_token(0, 0, on(14)).unwrap();
        game.place_token(0, 1, on(18)).unwrap();
        game.place_token(3, 0, on(17)).unwrap();
        let mut strategy = AggressiveStrategy::default();
        let ctx = game.move_context(0);
        assert_eq!(strategy.select_token(&ctx, 3), Some(0));
    }

    #[test]
    fn test_prefers_capture_over_base_exit() {
        let mut game = table();
        game.place_token(0, 0, on(30)).unwrap();
        game.place_token(2, 0, on(36)).unwrap();
        let strategy = AggressiveStrategy::default();
        let ctx = game.move_context(0);
        assert!(strategy.score(&ctx, 0, 6) > strategy.score(&ctx, 1, 6));
    }

    #[test]
    fn test_illegal_scores_negative_infinity() {
        let game = table();
        let strategy = AggressiveStrategy::default();
        let ctx = game.move_context(0);
        assert_eq!(strategy.score(&ctx, 0, 3), f64::NEG_INFINITY);
        assert_eq!(strategy.name(), "Aggressive");
    }
}
