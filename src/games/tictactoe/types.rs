//! Core domain types for tic-tac-toe.

use super::action::BoardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter};
use tracing::instrument;

/// Player mark in the game.
///
/// Each mark carries a signed weight that it contributes to every line sum
/// it touches. A line is complete exactly when the magnitude of its sum
/// equals the board size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Mark {
    /// Player X (goes first, weight +1).
    X,
    /// Player O (goes second, weight -1).
    O,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Signed contribution of this mark to a line sum.
    pub fn value(self) -> i64 {
        match self {
            Mark::X => 1,
            Mark::O => -1,
        }
    }

    /// Symbol used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl FromStr for Mark {
    type Err = BoardError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            _ => Err(BoardError::InvalidPlayer),
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns true if nobody has claimed this square.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// Symbol used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '-',
            Square::Occupied(mark) => mark.symbol(),
        }
    }
}
