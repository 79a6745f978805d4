use std::fmt;

use super::board::Board;
use super::color::Color;
use super::token::Token;
use crate::ai::MoveStrategy;

pub const TOKENS_PER_PLAYER: usize = 4;

/// Who decides which token moves.
pub enum Controller {
    /// Token choice is supplied by the caller on every turn.
    Human,
    /// Token choice comes from a scoring strategy.
    Automated(Box<dyn MoveStrategy>),
}

impl Clone for Controller {
    fn clone(&self) -> Self {
        match self {
            Controller::Human => Controller::Human,
            Controller::Automated(strategy) => Controller::Automated(strategy.clone_strategy()),
        }
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Human => f.write_str("Human"),
            Controller::Automated(strategy) => {
                f.debug_tuple("Automated").field(&strategy.name()).finish()
            }
        }
    }
}

/// A seat at the table: a color, its four tokens and a controller.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    color: Color,
    tokens: [Token; TOKENS_PER_PLAYER],
    controller: Controller,
    moves_made: usize,
    captures_made: usize,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color, controller: Controller) -> Self {
        Player {
            name: name.into(),
            color,
            tokens: [Token::new(color); TOKENS_PER_PLAYER],
            controller,
            moves_made: 0,
            captures_made: 0,
        }
    }

    pub fn human(name: impl Into<String>, color: Color) -> Self {
        Self::new(name, color, Controller::Human)
    }

    pub fn automated(name: impl Into<String>, color: Color, strategy: Box<dyn MoveStrategy>) -> Self {
        Self::new(name, color, Controller::Automated(strategy))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn tokens(&self) -> &[Token; TOKENS_PER_PLAYER] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }

    /// Name of the scoring strategy, `None` for human seats.
    pub fn strategy_name(&self) -> Option<&str> {
        match &self.controller {
            Controller::Human => None,
            Controller::Automated(strategy) => Some(strategy.name()),
        }
    }

    /// True once all four tokens have arrived.
    pub fn has_won(&self) -> bool {
        self.tokens.iter().all(Token::has_arrived)
    }

    pub fn tokens_arrived(&self) -> usize {
        self.tokens.iter().filter(|t| t.has_arrived()).count()
    }

    /// Tokens on the board, neither in base nor arrived.
    pub fn tokens_in_play(&self) -> usize {
        self.tokens.iter().filter(|t| t.node().is_some()).count()
    }

    pub fn has_any_legal_move(&self, board: &Board, roll: u8) -> bool {
        self.tokens.iter().any(|t| t.is_legal_move(board, roll))
    }

    /// Indices of tokens that can move `roll` steps.
    pub fn legal_moves(&self, board: &Board, roll: u8) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_legal_move(board, roll))
            .map(|(i, _)| i)
            .collect()
    }

    /// Moves this player has completed.
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Enemy tokens this player has sent back to base.
    pub fn captures_made(&self) -> usize {
        self.captures_made
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [Token; TOKENS_PER_PLAYER] {
        &mut self.tokens
    }

    pub(crate) fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub(crate) fn record_move(&mut self, captures: usize) {
        self.moves_made += 1;
        self.captures_made += captures;
    }
}
