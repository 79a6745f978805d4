use super::analysis::{HeuristicWeights, MoveAnalysis};
use super::strategy::{MoveContext, MoveStrategy};

/// Keeps tokens on safe cells and away from enemies that could reach them.
#[derive(Debug, Clone)]
pub struct DefensiveStrategy {
    weights: HeuristicWeights,
}

impl DefensiveStrategy {
    pub fn new(weights: HeuristicWeights) -> Self {
        DefensiveStrategy { weights }
    }

    pub fn default_weights() -> HeuristicWeights {
        HeuristicWeights {
            base_exit: 300.0,
            progress: 2.0,
            capture: 60.0,
            safe_landing: 350.0,
            threat: 25.0,
            arrival: 300.0,
        }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl Default for DefensiveStrategy {
    fn default() -> Self {
        Self::new(Self::default_weights())
    }
}

impl MoveStrategy for DefensiveStrategy {
    fn score(&self, ctx: &MoveContext<'_>, token: usize, roll: u8) -> f64 {
        match MoveAnalysis::analyze(ctx, token, roll) {
            Some(analysis) => self.weights.score(&analysis, 1.0),
            None => f64::NEG_INFINITY,
        }
    }

    fn name(&self) -> &str {
        "Defensive"
    }

    fn clone_strategy(&self) -> Box<dyn MoveStrategy> {
        Box::new(self.clone())
    }
}
