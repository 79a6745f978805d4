use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells on the shared track.
pub const TRACK_LEN: usize = 52;

/// Offset between consecutive colors' start cells.
const QUARTER: usize = TRACK_LEN / 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Green,
    Yellow,
    Red,
}

impl Color {
    /// All colors in turn order.
    pub const ALL: [Color; 4] = [Color::Blue, Color::Green, Color::Yellow, Color::Red];

    /// Position of this color in turn order.
    pub fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Green => 1,
            Color::Yellow => 2,
            Color::Red => 3,
        }
    }

    /// The color that plays after this one in a full table.
    pub fn next(self) -> Color {
        Color::ALL[(self.index() + 1) % Color::ALL.len()]
    }

    /// Shared-track cell a token is placed on when it leaves base.
    pub fn start_cell(self) -> usize {
        self.index() * QUARTER
    }

    /// Shared-track cell from which this color turns into its home stretch.
    /// Sits two cells behind the start cell, so a token covers 50 track steps
    /// before branching off.
    pub fn home_entry_cell(self) -> usize {
        (self.start_cell() + TRACK_LEN - 2) % TRACK_LEN
    }

    /// Get color name for display
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Red => "Red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
