//! N×N tic-tac-toe: board, marks, moves and move-selection strategies.

mod action;
mod board;
mod strategy;
mod types;

pub use action::{BoardError, Move, SelectError};
pub use board::{Board, DEFAULT_SIZE};
pub use strategy::{Strategy, check_playable};
pub use types::{Mark, Square};
