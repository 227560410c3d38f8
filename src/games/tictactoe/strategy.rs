//! One-ply move selection driven by the board's line sums.
//!
//! None of these strategies search: they read the running row, column and
//! diagonal sums the board already maintains and pick a square from them.
//!
//! Greedy and Evil assume the automated side plays the negative mark (O).
//! Handing them X does not flip the sign of their preferences.

use super::action::SelectError;
use super::board::Board;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, instrument};

/// Move selection algorithm used by automated players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Strategy {
    /// Uniformly random valid square.
    #[default]
    Random,
    /// Square whose combined line sums are most negative.
    Greedy,
    /// Square on the most positive line, to block X.
    Evil,
}

impl Strategy {
    /// Selects a position for the current board.
    ///
    /// `rng` is only consulted by `Strategy::Random`.
    ///
    /// # Errors
    ///
    /// `SelectError::NoMovesRemaining` if the board is full, otherwise
    /// `SelectError::GameAlreadyWon` if a line is complete.
    #[instrument(skip(board, rng), fields(size = board.size(), moves = board.move_count()))]
    pub fn select_move<R: Rng + ?Sized>(
        self,
        board: &Board,
        rng: &mut R,
    ) -> Result<usize, SelectError> {
        check_playable(board)?;
        let position = match self {
            Strategy::Random => random_move(board, rng)?,
            Strategy::Greedy => greedy_move(board),
            Strategy::Evil => evil_move(board),
        };
        debug!(strategy = %self, position, "Strategy chose position");
        Ok(position)
    }
}

impl TryFrom<String> for Strategy {
    type Error = strum::ParseError;

    /// Parses case-insensitively, the same way as `FromStr`.
    fn try_from(name: String) -> Result<Self, Self::Error> {
        Strategy::from_str(&name)
    }
}

/// Fails unless the board can still accept a move.
pub fn check_playable(board: &Board) -> Result<(), SelectError> {
    if !board.has_moves_remaining() {
        return Err(SelectError::NoMovesRemaining);
    }
    if board.is_won() {
        return Err(SelectError::GameAlreadyWon);
    }
    Ok(())
}

/// Yields `(position, row, col)` for every empty square in row-major order.
fn empty_squares(board: &Board) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
    let size = board.size();
    board
        .squares()
        .iter()
        .enumerate()
        .filter(|(_, square)| square.is_empty())
        .map(move |(idx, _)| (idx + 1, idx / size, idx % size))
}

/// Picks any valid square with equal probability.
fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<usize, SelectError> {
    board
        .valid_moves()
        .choose(rng)
        .copied()
        .ok_or(SelectError::NoMovesRemaining)
}

/// Sums every line through each empty square and takes the smallest total.
fn greedy_move(board: &Board) -> usize {
    let mut best_score = i64::MAX;
    let mut best_move = 1;

    for (position, row, col) in empty_squares(board) {
        let mut score = board.col_sums()[col] + board.row_sums()[row];
        if board.on_diagonal(row, col) {
            score += board.diag_sum();
        }
        if board.on_anti_diagonal(row, col) {
            score += board.anti_diag_sum();
        }

        // Strict comparison keeps the first square on ties.
        if score < best_score {
            best_score = score;
            best_move = position;
        }
    }

    best_move
}

/// Takes the square whose strongest line leans furthest towards X.
fn evil_move(board: &Board) -> usize {
    let mut best_score = i64::MIN;
    let mut best_move = 1;

    for (position, row, col) in empty_squares(board) {
        let mut score = board.col_sums()[col].max(board.row_sums()[row]);
        if board.on_diagonal(row, col) {
            score = score.max(board.diag_sum());
        }
        if board.on_anti_diagonal(row, col) {
            score = score.max(board.anti_diag_sum());
        }

        if score > best_score {
            best_score = score;
            best_move = position;
        }
    }

    best_move
}
