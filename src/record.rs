//! Serializable transcript of a game.

use crate::games::tictactoe::{Mark, Move};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line.
    Winner(Mark),
    /// Every square was filled without a completed line.
    Draw,
    /// A player exceeded the invalid-move budget and the game was stopped.
    Forfeit {
        /// The mark whose player kept proposing invalid moves.
        offender: Mark,
    },
}

impl Outcome {
    /// Returns the winning mark, if any.
    ///
    /// A forfeit concedes the game to the opponent of the offender.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Forfeit { offender } => Some(offender.opponent()),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Forfeit { offender } => write!(f, "{offender} forfeits"),
        }
    }
}

/// Everything needed to replay or audit a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Board side length.
    pub size: usize,
    /// Player names, first mover first.
    pub players: [String; 2],
    /// Accepted moves in order.
    pub moves: Vec<Move>,
    /// Final result, `None` while the game is still running.
    pub outcome: Option<Outcome>,
}

impl GameRecord {
    /// Creates an empty record.
    pub fn new(size: usize, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            size,
            players: [first.into(), second.into()],
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Serializes the record as pretty-printed JSON.
    #[instrument(skip(self), fields(moves = self.moves.len()))]
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
