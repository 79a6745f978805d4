use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::strategy::{MoveContext, MoveStrategy};
use crate::game::TOKENS_PER_PLAYER;

/// Picks uniformly among the tokens that can use the roll.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        RandomStrategy {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveStrategy for RandomStrategy {
    /// Every legal token scores the same; the choice happens in
    /// [`select_token`](MoveStrategy::select_token).
    fn score(&self, ctx: &MoveContext<'_>, token: usize, roll: u8) -> f64 {
        if ctx.is_legal(token, roll) {
            0.0
        } else {
            f64::NEG_INFINITY
        }
    }

    fn name(&self) -> &str {
        "Random"
    }

    /// The clone continues the same roll sequence.
    fn clone_strategy(&self) -> Box<dyn MoveStrategy> {
        Box::new(RandomStrategy {
            rng: self.rng.clone(),
        })
    }

    fn select_token(&mut self, ctx: &MoveContext<'_>, roll: u8) -> Option<usize> {
        let legal: Vec<usize> = (0..TOKENS_PER_PLAYER)
            .filter(|&t| ctx.is_legal(t, roll))
            .collect();
        if legal.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..legal.len());
        Some(legal[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Color, Game, Location, NodeId, Player};

    #[test]
    fn test_random_strategy_selects_legal_token() {
        let mut game = Game::standard(vec![Player::human("Blue", Color::Blue)]).unwrap();
        game.place_token(0, 1, Location::OnNode(NodeId::new(10))).unwrap();
        game.place_token(0, 3, Location::OnNode(NodeId::new(40))).unwrap();
        let mut strategy = RandomStrategy::seeded(3);
        let ctx = game.move_context(0);

        let mut seen = [false; 4];
        for _ in 0..200 {
            let token = strategy.select_token(&ctx, 4).unwrap();
            assert!(token == 1 || token == 3, "token {token} is not legal");
            seen[token] = true;
        }
        assert!(seen[1] && seen[3]);
    }

    #[test]
    fn test_random_strategy_no_legal_move() {
        let game = Game::standard(vec![Player::human("Red", Color::Red)]).unwrap();
        let mut strategy = RandomStrategy::new();
        assert_eq!(strategy.select_token(&game.move_context(0), 2), None);
    }

    #[test]
    fn test_random_strategy_plays_full_game() {
        let players = Color::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::automated(c.name(), c, Box::new(RandomStrategy::seeded(i as u64))))
            .collect();
        let mut game = Game::standard(players).unwrap();
        let mut die = crate::game::Die::seeded(11);

        let mut turns = 0;
        while !game.is_over() && turns < 20_000 {
            game.take_turn(die.roll(), None).unwrap();
            turns += 1;
        }
        assert!(game.is_over(), "no winner after {turns} turns");
        let winner = game.winner().unwrap();
        assert!(game.players()[winner].has_won());
    }

    #[test]
    fn test_clone_keeps_seeded_sequence() {
        let mut game = Game::standard(vec![Player::human("Blue", Color::Blue)]).unwrap();
        game.place_token(0, 0, Location::OnNode(NodeId::new(5))).unwrap();
        game.place_token(0, 2, Location::OnNode(NodeId::new(20))).unwrap();
        let ctx = game.move_context(0);

        let mut original = RandomStrategy::seeded(21);
        let mut cloned = original.clone_strategy();
        let picks_a: Vec<Option<usize>> = (0..50).map(|_| original.select_token(&ctx, 6)).collect();
        let picks_b: Vec<Option<usize>> = (0..50).map(|_| cloned.select_token(&ctx, 6)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_cloned_game_replays_identically() {
        let players = Color::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| Player::automated(c.name(), c, Box::new(RandomStrategy::seeded(i as u64))))
            .collect();
        let mut game = Game::standard(players).unwrap();
        let mut copy = game.clone();
        let mut die_a = crate::game::Die::seeded(4);
        let mut die_b = crate::game::Die::seeded(4);

        for _ in 0..200 {
            if game.is_over() {
                break;
            }
            let a = game.take_turn(die_a.roll(), None).unwrap();
            let b = copy.take_turn(die_b.roll(), None).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_random_strategy_name() {
        assert_eq!(RandomStrategy::new().name(), "Random");
    }
}
