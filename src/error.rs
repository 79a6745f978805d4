use std::path::PathBuf;

use crate::game::{Color, NodeId};

/// Errors raised when a move request cannot be carried out.
///
/// None of these mutate game state, so a caller can re-prompt or skip the
/// candidate and try another.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("roll {0} is outside 1..=6")]
    InvalidRoll(u8),

    #[error("player index {0} is out of range")]
    UnknownPlayer(usize),

    #[error("token index {0} is out of range")]
    UnknownToken(usize),

    #[error("token {token} has no legal move for a roll of {roll}")]
    IllegalMove { token: usize, roll: u8 },

    #[error("token {token} cannot be placed on {node}")]
    InvalidPlacement { token: usize, node: NodeId },

    #[error("{player} must choose a token to move")]
    ChoiceRequired { player: String },

    #[error("game is over")]
    GameOver,
}

/// Malformed board graphs. Only produced while a board is being built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("home stretch length {0} is outside 5..=6")]
    HomeStretchLength(usize),

    #[error("safe cell {0} is not on the shared track")]
    SafeCellOutOfRange(usize),

    #[error("shared track does not close into a cycle at {0}")]
    TrackNotCyclic(NodeId),

    #[error("no home branch for {0}")]
    MissingHomeBranch(Color),

    #[error("home branch at {node} does not belong to the entry of any color")]
    StrayHomeBranch { node: NodeId },

    #[error("home stretch for {color} is malformed: {reason}")]
    MalformedHomeStretch { color: Color, reason: String },
}

/// Errors in the seat list handed to a new game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("at most 4 players can be seated, got {0}")]
    TooManyPlayers(usize),

    #[error("color {0} is seated twice")]
    DuplicateColor(Color),
}

/// Errors that can occur while driving automated games.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("seat {seat} is human-controlled; simulations need automated players")]
    HumanSeat { seat: usize },

    #[error("lineup must seat exactly 4 strategies, got {0}")]
    LineupSize(usize),

    #[error("invalid lineup: {0}")]
    InvalidLineup(String),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("move error: {0}")]
    Move(#[from] MoveError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
