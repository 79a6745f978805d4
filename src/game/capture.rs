use serde::{Deserialize, Serialize};

use super::board::{Board, NodeId};
use super::color::Color;
use super::player::Player;
use super::token::{Location, Token};

/// A token sent back to base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub player: usize,
    pub token: usize,
    pub color: Color,
    pub node: NodeId,
}

/// Every token standing on `node`, as `(player index, token index, token)`.
pub fn occupants<'a>(
    players: &'a [Player],
    node: NodeId,
) -> impl Iterator<Item = (usize, usize, &'a Token)> + 'a {
    players.iter().enumerate().flat_map(move |(p, player)| {
        player
            .tokens()
            .iter()
            .enumerate()
            .filter(move |(_, token)| token.location() == Location::OnNode(node))
            .map(move |(t, token)| (p, t, token))
    })
}

/// How many tokens a `mover` token landing on `node` would capture.
pub fn capturable(board: &Board, players: &[Player], node: NodeId, mover: Color) -> usize {
    if board.is_safe(node) {
        return 0;
    }
    occupants(players, node)
        .filter(|(_, _, token)| token.color() != mover)
        .count()
}

/// Apply the landing rule for a `mover` token arriving on `node`.
///
/// On a safe node nothing happens. Otherwise every token of another color
/// on the node goes back to base in one pass; same-colored tokens stack.
/// Must run before the mover's own location is updated.
pub fn resolve_arrival(
    board: &Board,
    node: NodeId,
    mover: Color,
    players: &mut [Player],
) -> Vec<Capture> {
    if board.is_safe(node) {
        return Vec::new();
    }

    let mut captured = Vec::new();
    for (p, player) in players.iter_mut().enumerate() {
        for (t, token) in player.tokens_mut().iter_mut().enumerate() {
            if token.color() != mover && token.location() == Location::OnNode(node) {
                token.send_to_base();
                captured.push(Capture {
                    player: p,
                    token: t,
                    color: token.color(),
                    node,
                });
            }
        }
    }

    for capture in &captured {
        log::debug!(
            "{mover} captures {} token {} on {}",
            capture.color,
            capture.token,
            capture.node
        );
    }
    captured
}
