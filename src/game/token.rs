use serde::{Deserialize, Serialize};

use super::board::{Board, NodeId};
use super::color::Color;

/// Roll that lets a token leave base.
pub const EXIT_ROLL: u8 = 6;

/// Where a token currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    InBase,
    OnNode(NodeId),
    Arrived,
}

/// Where a legal move would put a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Node(NodeId),
    Home,
}

impl Destination {
    pub fn location(self) -> Location {
        match self {
            Destination::Node(node) => Location::OnNode(node),
            Destination::Home => Location::Arrived,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    color: Color,
    location: Location,
}

impl Token {
    /// A fresh token waiting in base.
    pub fn new(color: Color) -> Self {
        Token {
            color,
            location: Location::InBase,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_in_base(&self) -> bool {
        self.location == Location::InBase
    }

    pub fn has_arrived(&self) -> bool {
        self.location == Location::Arrived
    }

    /// Node the token stands on, if it is on the board.
    pub fn node(&self) -> Option<NodeId> {
        match self.location {
            Location::OnNode(node) => Some(node),
            _ => None,
        }
    }

    /// Compute where `roll` would take this token without moving it.
    ///
    /// From base only a six is legal and lands on the color's start node.
    /// On the board the token walks `roll` successors; running out of
    /// successors exactly on the last step means arrival, any earlier means
    /// the roll overshoots and there is no legal target.
    pub fn simulate_move(&self, board: &Board, roll: u8) -> Option<Destination> {
        match self.location {
            Location::InBase => {
                (roll == EXIT_ROLL).then(|| Destination::Node(board.start_node(self.color)))
            }
            Location::OnNode(node) => walk(board, self.color, node, roll),
            Location::Arrived => None,
        }
    }

    pub fn is_legal_move(&self, board: &Board, roll: u8) -> bool {
        self.simulate_move(board, roll).is_some()
    }

    /// Steps still needed to arrive. Base counts as one step before the
    /// start node.
    pub fn steps_to_arrival(&self, board: &Board) -> u32 {
        match self.location {
            Location::InBase => board.full_path_len(self.color),
            Location::OnNode(node) => board.steps_to_arrival(node, self.color).unwrap_or(0),
            Location::Arrived => 0,
        }
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub(crate) fn send_to_base(&mut self) {
        self.location = Location::InBase;
    }
}

fn walk(board: &Board, color: Color, from: NodeId, roll: u8) -> Option<Destination> {
    if roll == 0 {
        return None;
    }
    let mut current = from;
    for step in 1..=roll {
        match board.successor(current, color) {
            Some(next) => current = next,
            None if step == roll => return Some(Destination::Home),
            None => return None,
        }
    }
    Some(Destination::Node(current))
}
