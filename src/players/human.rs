//! Human player that reads moves from a line-oriented input stream.

use super::Player;
use crate::games::tictactoe::{Board, Mark, SelectError, check_playable};
use std::io::{BufRead, Write};
use tracing::{debug, instrument};

/// Human player using text input.
///
/// Input and output are explicit so a terminal, a pipe or a scripted
/// `Cursor` can drive the same code.
pub struct HumanPlayer<R, W> {
    name: String,
    mark: Mark,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, mark: Mark, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            mark,
            input,
            output,
        }
    }

    /// Consumes the player and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    #[instrument(skip(self, board), fields(player = %self.name))]
    fn select_move(&mut self, board: &Board) -> Result<usize, SelectError> {
        check_playable(board)?;

        writeln!(
            self.output,
            "{} - Please enter your next move as a number between 1 and {}",
            self.name,
            board.cell_count()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SelectError::InputClosed);
        }

        let entry = line.trim();
        debug!(entry, "Read move");
        entry
            .parse::<usize>()
            .map_err(|_| SelectError::InvalidInput(entry.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }
}
