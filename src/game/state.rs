use std::collections::HashSet;

use serde::Serialize;

use super::board::{Board, NodeKind};
use super::capture::{self, Capture};
use super::player::{Controller, Player, TOKENS_PER_PLAYER};
use super::token::{Destination, Location};
use super::NodeId;
use crate::ai::MoveContext;
use crate::error::{MoveError, SetupError};

/// One completed token move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: usize,
    pub token: usize,
    pub roll: u8,
    pub from: Location,
    pub to: Location,
    pub captures: Vec<Capture>,
}

/// Result of a finished turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TurnOutcome {
    Moved { record: MoveRecord, won: bool },
    /// No token could use the roll; the turn still passes.
    NoLegalMove { player: usize, roll: u8 },
}

impl TurnOutcome {
    pub fn player(&self) -> usize {
        match self {
            TurnOutcome::Moved { record, .. } => record.player,
            TurnOutcome::NoLegalMove { player, .. } => *player,
        }
    }
}

/// A game in progress: the board, the seats in turn order and the round
/// state. All mutation goes through `&mut self`, so turns never interleave.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    current: usize,
    last_roll: Option<u8>,
    winner: Option<usize>,
    turns_taken: usize,
}

impl Game {
    /// Seat `players` in the given turn order on `board`.
    pub fn new(board: Board, players: Vec<Player>) -> Result<Self, SetupError> {
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if players.len() > 4 {
            return Err(SetupError::TooManyPlayers(players.len()));
        }
        let mut colors = HashSet::new();
        for player in &players {
            if !colors.insert(player.color()) {
                return Err(SetupError::DuplicateColor(player.color()));
            }
        }

        Ok(Game {
            board,
            players,
            current: 0,
            last_roll: None,
            winner: None,
            turns_taken: 0,
        })
    }

    /// Seat `players` on the standard board.
    pub fn standard(players: Vec<Player>) -> Result<Self, SetupError> {
        Self::new(Board::standard(), players)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Most recent roll used by a completed turn.
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn turns_taken(&self) -> usize {
        self.turns_taken
    }

    pub fn has_won(&self, player: usize) -> bool {
        self.players.get(player).is_some_and(Player::has_won)
    }

    pub fn has_any_legal_move(&self, player: usize, roll: u8) -> bool {
        self.players
            .get(player)
            .is_some_and(|p| p.has_any_legal_move(&self.board, roll))
    }

    /// Token indices `player` may move with `roll`, for presenting to a
    /// human chooser.
    pub fn legal_moves(&self, player: usize, roll: u8) -> Vec<usize> {
        self.players
            .get(player)
            .map(|p| p.legal_moves(&self.board, roll))
            .unwrap_or_default()
    }

    /// Where `roll` would take a token, without moving it.
    pub fn simulate_move(
        &self,
        player: usize,
        token: usize,
        roll: u8,
    ) -> Result<Option<Destination>, MoveError> {
        let player = self.players.get(player).ok_or(MoveError::UnknownPlayer(player))?;
        let token = player.token(token).ok_or(MoveError::UnknownToken(token))?;
        Ok(token.simulate_move(&self.board, roll))
    }

    pub fn is_legal_move(&self, player: usize, token: usize, roll: u8) -> bool {
        matches!(self.simulate_move(player, token, roll), Ok(Some(_)))
    }

    /// Tokens on `node` as `(player index, token index)`.
    pub fn occupants(&self, node: NodeId) -> Vec<(usize, usize)> {
        capture::occupants(&self.players, node)
            .map(|(p, t, _)| (p, t))
            .collect()
    }

    /// Scoring view of the table from `player`'s seat.
    pub fn move_context(&self, player: usize) -> MoveContext<'_> {
        MoveContext::new(&self.board, &self.players, player)
    }

    /// Move one token of `player` by `roll`, resolving captures on landing.
    ///
    /// Does not advance the turn. Fails without touching state when the
    /// move is illegal.
    pub fn apply_move(
        &mut self,
        player: usize,
        token: usize,
        roll: u8,
    ) -> Result<MoveRecord, MoveError> {
        check_roll(roll)?;
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let seat = self.players.get(player).ok_or(MoveError::UnknownPlayer(player))?;
        let color = seat.color();
        let from = seat.token(token).ok_or(MoveError::UnknownToken(token))?.location();
        let destination = self
            .simulate_move(player, token, roll)?
            .ok_or(MoveError::IllegalMove { token, roll })?;

        let captures = match destination {
            Destination::Node(node) => {
                capture::resolve_arrival(&self.board, node, color, &mut self.players)
            }
            Destination::Home => Vec::new(),
        };
        let to = destination.location();
        let seat = &mut self.players[player];
        seat.tokens_mut()[token].set_location(to);
        seat.record_move(captures.len());

        log::debug!(
            "{} rolls {}: token {} {:?} -> {:?}",
            seat.name(),
            roll,
            token,
            from,
            to
        );

        Ok(MoveRecord {
            player,
            token,
            roll,
            from,
            to,
            captures,
        })
    }

    /// Play the current player's turn with `roll`.
    ///
    /// Human seats must pass the token index in `choice`; automated seats
    /// ignore it and ask their strategy. A missing or illegal human choice
    /// returns an error and leaves the turn with the same player. A roll no
    /// token can use passes the turn.
    pub fn take_turn(&mut self, roll: u8, choice: Option<usize>) -> Result<TurnOutcome, MoveError> {
        check_roll(roll)?;
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let player = self.current;
        if !self.has_any_legal_move(player, roll) {
            log::debug!("{} rolls {}: no legal move", self.players[player].name(), roll);
            self.finish_turn(roll);
            return Ok(TurnOutcome::NoLegalMove { player, roll });
        }

        let token = if self.players[player].is_human() {
            let token = choice.ok_or_else(|| MoveError::ChoiceRequired {
                player: self.players[player].name().to_string(),
            })?;
            if token >= TOKENS_PER_PLAYER {
                return Err(MoveError::UnknownToken(token));
            }
            if !self.is_legal_move(player, token, roll) {
                return Err(MoveError::IllegalMove { token, roll });
            }
            token
        } else {
            match self.select_automated(player, roll) {
                Some(token) => token,
                None => {
                    self.finish_turn(roll);
                    return Ok(TurnOutcome::NoLegalMove { player, roll });
                }
            }
        };

        let record = self.apply_move(player, token, roll)?;
        let won = self.players[player].has_won();
        if won {
            self.winner = Some(player);
            log::info!(
                "{} wins after {} turns",
                self.players[player].name(),
                self.turns_taken + 1
            );
        }
        self.finish_turn(roll);
        Ok(TurnOutcome::Moved { record, won })
    }

    /// Put a token straight onto `location`, bypassing movement rules.
    /// Meant for setting up positions; does not touch turn order or the
    /// winner.
    pub fn place_token(
        &mut self,
        player: usize,
        token: usize,
        location: Location,
    ) -> Result<(), MoveError> {
        let color = self
            .players
            .get(player)
            .ok_or(MoveError::UnknownPlayer(player))?
            .color();
        if token >= TOKENS_PER_PLAYER {
            return Err(MoveError::UnknownToken(token));
        }
        if let Location::OnNode(node) = location {
            let reachable = match self.board.node(node).map(|n| n.kind()) {
                Some(NodeKind::Track) => true,
                Some(NodeKind::HomeStretch(owner)) => owner == color,
                None => false,
            };
            if !reachable {
                return Err(MoveError::InvalidPlacement { token, node });
            }
        }
        self.players[player].tokens_mut()[token].set_location(location);
        Ok(())
    }

    fn select_automated(&mut self, player: usize, roll: u8) -> Option<usize> {
        // The strategy needs `&mut` for its own state while reading the table.
        let mut controller =
            std::mem::replace(self.players[player].controller_mut(), Controller::Human);
        let selected = match &mut controller {
            Controller::Automated(strategy) => {
                let ctx = MoveContext::new(&self.board, &self.players, player);
                strategy.select_token(&ctx, roll)
            }
            Controller::Human => None,
        };
        *self.players[player].controller_mut() = controller;
        selected
    }

    fn finish_turn(&mut self, roll: u8) {
        self.last_roll = Some(roll);
        self.turns_taken += 1;
        if !self.is_over() {
            self.current = (self.current + 1) % self.players.len();
        }
    }
}

fn check_roll(roll: u8) -> Result<(), MoveError> {
    if (1..=6).contains(&roll) {
        Ok(())
    } else {
        Err(MoveError::InvalidRoll(roll))
    }
}
