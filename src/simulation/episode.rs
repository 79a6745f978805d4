use serde::Serialize;

use crate::error::SimulationError;
use crate::game::{Die, Game, TurnOutcome};

/// How one automated game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// Winning seat, `None` when the turn limit ran out first.
    pub winner: Option<usize>,
    pub turns: usize,
    /// Enemy tokens captured, per seat.
    pub captures: Vec<usize>,
    /// Completed moves, per seat.
    pub moves: Vec<usize>,
}

/// Play `game` to the end or to `max_turns` turns, rolling `die`.
pub fn play_game(game: &mut Game, die: &mut Die, max_turns: usize) -> Result<GameSummary, SimulationError> {
    play_game_with(game, die, max_turns, |_, _| {})
}

/// Like [`play_game`], calling `on_turn` with each roll and its outcome.
pub fn play_game_with<F>(
    game: &mut Game,
    die: &mut Die,
    max_turns: usize,
    mut on_turn: F,
) -> Result<GameSummary, SimulationError>
where
    F: FnMut(u8, &TurnOutcome),
{
    if let Some(seat) = game.players().iter().position(|p| p.is_human()) {
        return Err(SimulationError::HumanSeat { seat });
    }

    while !game.is_over() && game.turns_taken() < max_turns {
        let roll = die.roll();
        let outcome = game.take_turn(roll, None)?;
        on_turn(roll, &outcome);
    }

    if !game.is_over() {
        log::warn!("no winner after {} turns", game.turns_taken());
    }

    Ok(GameSummary {
        winner: game.winner(),
        turns: game.turns_taken(),
        captures: game.players().iter().map(|p| p.captures_made()).collect(),
        moves: game.players().iter().map(|p| p.moves_made()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AggressiveStrategy, BalancedStrategy, DefensiveStrategy, RandomStrategy};
    use crate::game::{Color, Player};

    fn automated_game() -> Game {
        let players = vec![
            Player::automated("Blue", Color::Blue, Box::new(AggressiveStrategy::default())),
            Player::automated("Green", Color::Green, Box::new(DefensiveStrategy::default())),
            Player::automated("Yellow", Color::Yellow, Box::new(BalancedStrategy::default())),
            Player::automated("Red", Color::Red, Box::new(RandomStrategy::seeded(5))),
        ];
        Game::standard(players).unwrap()
    }

    #[test]
    fn test_play_game_finishes() {
        let mut game = automated_game();
        let mut die = Die::seeded(1);
        let summary = play_game(&mut game, &mut die, 20_000).unwrap();

        let winner = summary.winner.expect("game should finish");
        assert!(game.players()[winner].has_won());
        assert_eq!(summary.turns, game.turns_taken());
        assert_eq!(summary.moves.len(), 4);
        assert!(summary.moves[winner] >= 4);
    }

    #[test]
    fn test_turn_limit_stops_game() {
        let mut game = automated_game();
        let mut die = Die::seeded(2);
        let summary = play_game(&mut game, &mut die, 10).unwrap();
        assert_eq!(summary.winner, None);
        assert_eq!(summary.turns, 10);
    }

    #[test]
    fn test_on_turn_sees_every_turn() {
        let mut game = automated_game();
        let mut die = Die::seeded(3);
        let mut seen = Vec::new();
        play_game_with(&mut game, &mut die, 40, |roll, outcome| {
            seen.push((roll, outcome.player()));
        })
        .unwrap();
        assert_eq!(seen.len(), 40);
        assert_eq!(seen[0].1, 0);
        assert_eq!(seen[1].1, 1);
        assert!(seen.iter().all(|(roll, _)| (1..=6).contains(roll)));
    }

    #[test]
    fn test_rejects_human_seat() {
        let players = vec![
            Player::automated("Blue", Color::Blue, Box::new(AggressiveStrategy::default())),
            Player::human("Green", Color::Green),
        ];
        let mut game = Game::standard(players).unwrap();
        let err = play_game(&mut game, &mut Die::seeded(0), 100).unwrap_err();
        assert!(matches!(err, SimulationError::HumanSeat { seat: 1 }));
    }

    #[test]
    fn test_seeded_games_repeat() {
        let run = || {
            let mut game = automated_game();
            play_game(&mut game, &mut Die::seeded(9), 20_000).unwrap()
        };
        assert_eq!(run(), run());
    }
}
