//! Move records and the errors raised while making or choosing moves.
//!
//! Rejected-but-legal outcomes (an occupied square, a claim after the game
//! is won) are not errors; `Board::claim` reports them as `Ok(false)`.

use super::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A successful claim: a mark placed at a 1-indexed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// The 1-indexed, row-major position it was placed at.
    pub position: usize,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(mark: Mark, position: usize) -> Self {
        Self { mark, position }
    }

    /// Returns the mark of this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position)
    }
}

/// Error raised by board construction or by `Board::claim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The requested side length cannot hold a game.
    #[display("Board size must be greater than 1 (got {})", _0)]
    InvalidSize(usize),

    /// No mark (or an unrecognised one) was supplied.
    #[display("Player mark is missing or unrecognised")]
    InvalidPlayer,

    /// The same mark tried to move twice in a row.
    #[display("{} just moved. Other player must play next", _0)]
    ConsecutiveMove(Mark),

    /// Serialized board data contradicts itself.
    #[display("Inconsistent board data: {}", _0)]
    InvalidSnapshot(&'static str),
}

impl std::error::Error for BoardError {}

/// Error raised when a move source cannot produce a position.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum SelectError {
    /// Every square is already taken.
    #[display("Can't select next move when no moves remain")]
    NoMovesRemaining,

    /// The board already has a completed line.
    #[display("Can't make a move when game has already been won")]
    GameAlreadyWon,

    /// Input could not be read as a position.
    #[display("Not a position: {:?}", _0)]
    InvalidInput(String),

    /// The input stream ended before a move was entered.
    #[display("Input closed before a move was entered")]
    InputClosed,

    /// Reading input or writing a prompt failed.
    #[display("I/O error: {}", _0)]
    #[from]
    Io(std::io::Error),
}

impl std::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectError::Io(err) => Some(err),
            _ => None,
        }
    }
}
