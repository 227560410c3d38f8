//! N×N board with constant-time win detection.
//!
//! Every mark contributes its signed weight (+1 for X, -1 for O) to the
//! running sum of each line it lies on: its row, its column, and the two
//! diagonals when the square sits on them. A line holds a single mark on
//! every square exactly when the magnitude of its sum equals the board
//! size, so checking for a win after a move only inspects the four sums
//! the move touched.
//!
//! Positions are 1-indexed and row-major:
//!
//! ```text
//! 1 2 3
//! 4 5 6
//! 7 8 9
//! ```

use super::action::BoardError;
use super::types::{Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Side length used by `Board::default`.
pub const DEFAULT_SIZE: usize = 3;

/// Tic-tac-toe board of arbitrary size with incremental line sums.
///
/// Serializes as its size, squares and last mover. Deserializing rebuilds
/// the sums from the squares and rejects data no sequence of claims could
/// have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BoardSnapshot", try_from = "BoardSnapshot")]
pub struct Board {
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
    row_sums: Vec<i64>,
    col_sums: Vec<i64>,
    /// Top-left to bottom-right.
    diag_sum: i64,
    /// Top-right to bottom-left.
    anti_diag_sum: i64,
    last_mover: Option<Mark>,
    move_count: usize,
    won: bool,
}

impl Board {
    /// Creates an empty `size` × `size` board.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::InvalidSize` if `size <= 1`.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size <= 1 {
            return Err(BoardError::InvalidSize(size));
        }
        let cells = size
            .checked_mul(size)
            .ok_or(BoardError::InvalidSize(size))?;

        debug!(size, cells, "Creating board");
        Ok(Self::empty(size))
    }

    /// Callers must have checked `size`.
    fn empty(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
            row_sums: vec![0; size],
            col_sums: vec![0; size],
            diag_sum: 0,
            anti_diag_sum: 0,
            last_mover: None,
            move_count: 0,
            won: false,
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of squares (`size²`).
    pub fn cell_count(&self) -> usize {
        self.squares.len()
    }

    /// Returns the running sum of each row.
    pub fn row_sums(&self) -> &[i64] {
        &self.row_sums
    }

    /// Returns the running sum of each column.
    pub fn col_sums(&self) -> &[i64] {
        &self.col_sums
    }

    /// Returns the running sum of the top-left to bottom-right diagonal.
    pub fn diag_sum(&self) -> i64 {
        self.diag_sum
    }

    /// Returns the running sum of the top-right to bottom-left diagonal.
    pub fn anti_diag_sum(&self) -> i64 {
        self.anti_diag_sum
    }

    /// Returns the number of successful claims.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns the mark that made the last successful claim.
    pub fn last_mover(&self) -> Option<Mark> {
        self.last_mover
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Gets the square at a 1-indexed position.
    pub fn square(&self, position: usize) -> Option<Square> {
        position
            .checked_sub(1)
            .and_then(|idx| self.squares.get(idx))
            .copied()
    }

    /// Returns true if any square is still empty.
    pub fn has_moves_remaining(&self) -> bool {
        self.move_count < self.cell_count()
    }

    /// Returns true once some line is filled by a single mark.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Returns the winning mark, if the board is won.
    ///
    /// Only the mover can complete a line, so the winner is the last mover.
    pub fn winner(&self) -> Option<Mark> {
        if self.won { self.last_mover } else { None }
    }

    /// Checks whether a position is on the board and unoccupied.
    ///
    /// Out-of-range positions are simply invalid, never an error.
    pub fn is_valid_move(&self, position: usize) -> bool {
        matches!(self.square(position), Some(Square::Empty))
    }

    /// Returns every valid position in row-major order.
    pub fn valid_moves(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| square.is_empty())
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    /// Converts a 1-indexed position to zero-indexed `(row, col)`.
    pub fn position_to_row_col(&self, position: usize) -> Option<(usize, usize)> {
        if position == 0 || position > self.cell_count() {
            return None;
        }
        let idx = position - 1;
        Some((idx / self.size, idx % self.size))
    }

    /// Converts zero-indexed `(row, col)` to a 1-indexed position.
    pub fn row_col_to_position(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col + 1)
    }

    /// Returns true if `(row, col)` lies on the top-left to bottom-right diagonal.
    pub fn on_diagonal(&self, row: usize, col: usize) -> bool {
        row == col
    }

    /// Returns true if `(row, col)` lies on the top-right to bottom-left diagonal.
    pub fn on_anti_diagonal(&self, row: usize, col: usize) -> bool {
        row + col == self.size - 1
    }

    /// Claims a square for `mark`.
    ///
    /// Returns `Ok(true)` if the claim was applied, `Ok(false)` if the board
    /// is already won or the position is not a valid move. Neither rejection
    /// changes any state.
    ///
    /// # Errors
    ///
    /// - `BoardError::InvalidPlayer` if no mark is given.
    /// - `BoardError::ConsecutiveMove` if `mark` also made the previous
    ///   claim. Turn order is checked before the position is.
    #[instrument(skip(self, mark), fields(size = self.size))]
    pub fn claim(
        &mut self,
        position: usize,
        mark: impl Into<Option<Mark>>,
    ) -> Result<bool, BoardError> {
        let mark = mark.into().ok_or(BoardError::InvalidPlayer)?;

        if self.last_mover == Some(mark) {
            return Err(BoardError::ConsecutiveMove(mark));
        }

        if self.won {
            debug!(%mark, position, "Board already won, claim ignored");
            return Ok(false);
        }

        let Some((row, col)) = self.position_to_row_col(position) else {
            debug!(%mark, position, "Position off the board");
            return Ok(false);
        };
        if !self.squares[position - 1].is_empty() {
            debug!(%mark, position, "Square already occupied");
            return Ok(false);
        }

        self.squares[position - 1] = Square::Occupied(mark);
        self.last_mover = Some(mark);
        self.move_count += 1;
        self.add_to_lines(mark, row, col);

        if self.completes_line(row, col) {
            debug!(%mark, position, "Line completed");
            self.won = true;
        }

        Ok(true)
    }

    fn add_to_lines(&mut self, mark: Mark, row: usize, col: usize) {
        let value = mark.value();
        self.row_sums[row] += value;
        self.col_sums[col] += value;
        if self.on_diagonal(row, col) {
            self.diag_sum += value;
        }
        // The centre of an odd board lies on both diagonals.
        if self.on_anti_diagonal(row, col) {
            self.anti_diag_sum += value;
        }
    }

    fn completes_line(&self, row: usize, col: usize) -> bool {
        let full = self.size as u64;
        [
            self.row_sums[row],
            self.col_sums[col],
            self.diag_sum,
            self.anti_diag_sum,
        ]
        .iter()
        .any(|sum| sum.unsigned_abs() == full)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE)
    }
}

/// Serialized form of a [`Board`]. The line sums, move count and won flag
/// are derived from the squares on the way back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardSnapshot {
    size: usize,
    squares: Vec<Square>,
    last_mover: Option<Mark>,
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        Self {
            size: board.size,
            squares: board.squares,
            last_mover: board.last_mover,
        }
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    #[instrument(skip(snapshot), fields(size = snapshot.size))]
    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let mut board = Board::new(snapshot.size)?;
        if snapshot.squares.len() != board.cell_count() {
            return Err(BoardError::InvalidSnapshot("square count does not match size"));
        }

        let (mut x_count, mut o_count) = (0usize, 0usize);
        for (idx, square) in snapshot.squares.into_iter().enumerate() {
            let Square::Occupied(mark) = square else {
                continue;
            };
            match mark {
                Mark::X => x_count += 1,
                Mark::O => o_count += 1,
            }
            board.squares[idx] = square;
            board.move_count += 1;
            board.add_to_lines(mark, idx / board.size, idx % board.size);
        }

        if x_count.abs_diff(o_count) > 1 {
            return Err(BoardError::InvalidSnapshot("marks do not alternate"));
        }
        let last_mover = match (snapshot.last_mover, board.move_count) {
            (None, 0) => None,
            (None, _) => return Err(BoardError::InvalidSnapshot("missing last mover")),
            (Some(_), 0) => return Err(BoardError::InvalidSnapshot("last mover on empty board")),
            (Some(mark), _) => Some(mark),
        };
        let leader = match x_count.cmp(&o_count) {
            std::cmp::Ordering::Greater => Some(Mark::X),
            std::cmp::Ordering::Less => Some(Mark::O),
            std::cmp::Ordering::Equal => None,
        };
        if leader.is_some_and(|leader| last_mover != Some(leader)) {
            return Err(BoardError::InvalidSnapshot("last mover does not hold the extra mark"));
        }

        // A completed line can only belong to whoever moved last.
        if let Some(last) = last_mover {
            let full = board.size as i64 * last.value();
            let lines: Vec<i64> = board
                .row_sums
                .iter()
                .chain(board.col_sums.iter())
                .copied()
                .chain([board.diag_sum, board.anti_diag_sum])
                .collect();
            if lines.contains(&-full) {
                return Err(BoardError::InvalidSnapshot("line completed out of turn"));
            }
            board.won = lines.contains(&full);
        }
        board.last_mover = last_mover;

        debug!(moves = board.move_count, won = board.won, "Board restored");
        Ok(board)
    }
}

/// Renders the board framed in asterisks, e.g.
///
/// ```text
/// *********
/// * X O X *
/// * - X - *
/// * O - - *
/// *********
/// ```
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let border = "*".repeat(self.size * 2 + 3);
        writeln!(f, "{border}")?;
        for row in self.squares.chunks(self.size) {
            write!(f, "*")?;
            for square in row {
                write!(f, " {}", square.symbol())?;
            }
            writeln!(f, " *")?;
        }
        write!(f, "{border}")
    }
}
