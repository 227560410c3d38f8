//! Player trait and implementations.

mod ai;
mod human;

pub use ai::AiPlayer;
pub use human::HumanPlayer;

use crate::games::tictactoe::{Board, Mark, SelectError};

/// A source of moves for one side of the game.
///
/// Implementations receive a read-only view of the board and propose a
/// 1-indexed position. A proposal is not guaranteed to be a valid move; the
/// caller checks it against the board and may ask again.
pub trait Player {
    /// Proposes the next position for this player's mark.
    fn select_move(&mut self, board: &Board) -> Result<usize, SelectError>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Returns the mark this player places.
    fn mark(&self) -> Mark;
}
