use crate::game::{Board, Color, Destination, Player, TOKENS_PER_PLAYER};

/// Read-only view of the table handed to a strategy: the board, every
/// seat, and which seat is about to move.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    board: &'a Board,
    players: &'a [Player],
    mover: usize,
}

impl<'a> MoveContext<'a> {
    /// `mover` must index into `players`.
    pub fn new(board: &'a Board, players: &'a [Player], mover: usize) -> Self {
        MoveContext {
            board,
            players,
            mover,
        }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    pub fn players(&self) -> &'a [Player] {
        self.players
    }

    pub fn mover_index(&self) -> usize {
        self.mover
    }

    pub fn mover(&self) -> &'a Player {
        &self.players[self.mover]
    }

    pub fn color(&self) -> Color {
        self.mover().color()
    }

    /// Where the mover's `token` would go with `roll`.
    pub fn destination(&self, token: usize, roll: u8) -> Option<Destination> {
        self.mover()
            .token(token)
            .and_then(|t| t.simulate_move(self.board, roll))
    }

    pub fn is_legal(&self, token: usize, roll: u8) -> bool {
        self.destination(token, roll).is_some()
    }
}

/// Interface for automated token choice.
pub trait MoveStrategy: Send {
    /// Desirability of moving `token` by `roll`. Scores only compare within
    /// one strategy. Illegal candidates and arrived tokens score
    /// `f64::NEG_INFINITY`.
    fn score(&self, ctx: &MoveContext<'_>, token: usize, roll: u8) -> f64;

    /// Display name.
    fn name(&self) -> &str;

    /// Clone into a boxed trait object.
    fn clone_strategy(&self) -> Box<dyn MoveStrategy>;

    /// Pick a token to move, `None` when no token can use `roll`.
    ///
    /// The strictly greatest score wins, so ties go to the lowest token
    /// index.
    fn select_token(&mut self, ctx: &MoveContext<'_>, roll: u8) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for token in 0..TOKENS_PER_PLAYER {
            if !ctx.is_legal(token, roll) {
                continue;
            }
            let score = self.score(ctx, token, roll);
            if score == f64::NEG_INFINITY {
                continue;
            }
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((token, score)),
            }
        }
        best.map(|(token, _)| token)
    }
}
