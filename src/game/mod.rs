//! Core Ludo rules: the node graph, tokens and their movement, capture
//! resolution and the turn engine.

mod board;
mod capture;
mod color;
mod dice;
mod player;
mod state;
mod token;

pub use board::{Board, BoardBuilder, Node, NodeId, NodeKind, DEFAULT_HOME_STRETCH_LEN, SAFE_CELLS};
pub use capture::{capturable, occupants, resolve_arrival, Capture};
pub use color::{Color, TRACK_LEN};
pub use dice::Die;
pub use player::{Controller, Player, TOKENS_PER_PLAYER};
pub use state::{Game, MoveRecord, TurnOutcome};
pub use token::{Destination, Location, Token, EXIT_ROLL};
