//! Game orchestration between players.

use crate::games::tictactoe::{Board, Mark, Move, SelectError};
use crate::players::Player;
use crate::record::{GameRecord, Outcome};
use anyhow::{Result, bail};
use tracing::{debug, info, instrument, warn};

/// Default number of invalid proposals tolerated per turn.
pub const DEFAULT_MAX_INVALID_MOVES: usize = 3;

/// Events emitted while a game runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board rendering after the game starts or a move is made.
    StateChanged(String),
    /// A player proposed something that is not a valid move.
    InvalidMove {
        /// Name of the player.
        player: String,
        /// The proposed position, if the input was a number at all.
        position: Option<usize>,
        /// Invalid proposals so far this turn.
        attempts: usize,
    },
    /// A move was applied.
    MoveMade {
        /// Name of the player.
        player: String,
        /// The applied move.
        mov: Move,
    },
    /// Game ended.
    GameOver {
        /// How it ended.
        outcome: Outcome,
        /// Name of the winning player, if any.
        winner: Option<String>,
    },
}

/// Orchestrates gameplay between two players on one board.
pub struct Orchestrator {
    board: Board,
    players: [Box<dyn Player>; 2],
    max_invalid_moves: usize,
    record: GameRecord,
}

impl Orchestrator {
    /// Creates a new orchestrator. `first` makes the opening move.
    ///
    /// # Errors
    ///
    /// Fails if both players hold the same mark or the board already has
    /// moves on it.
    pub fn new(
        board: Board,
        first: Box<dyn Player>,
        second: Box<dyn Player>,
        max_invalid_moves: usize,
    ) -> Result<Self> {
        if first.mark() == second.mark() {
            bail!(
                "Both players hold mark {}; each side needs its own mark",
                first.mark()
            );
        }
        if board.move_count() != 0 {
            bail!("Games must start on an empty board");
        }

        let record = GameRecord::new(board.size(), first.name(), second.name());
        Ok(Self {
            board,
            players: [first, second],
            max_invalid_moves,
            record,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the transcript so far.
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Returns the name of the player holding `mark`.
    pub fn player_name(&self, mark: Mark) -> Option<&str> {
        self.players
            .iter()
            .find(|player| player.mark() == mark)
            .map(|player| player.name())
    }

    /// Runs the game loop until a win, a draw or a forfeit.
    ///
    /// Every event is passed to `on_event` as it happens.
    ///
    /// # Errors
    ///
    /// Propagates move-source failures other than unparseable input (for
    /// example closed input) and any board protocol violation.
    #[instrument(skip_all, fields(size = self.board.size()))]
    pub fn run(&mut self, mut on_event: impl FnMut(&GameEvent)) -> Result<Outcome> {
        info!(
            first = self.players[0].name(),
            second = self.players[1].name(),
            "Starting game orchestration"
        );
        on_event(&GameEvent::StateChanged(self.board.to_string()));

        let mut current = 0;
        while self.board.has_moves_remaining() && !self.board.is_won() {
            let Some(position) = self.next_valid_move(current, &mut on_event)? else {
                let offender = self.players[current].mark();
                warn!(
                    player = self.players[current].name(),
                    budget = self.max_invalid_moves,
                    "Invalid move budget exceeded"
                );
                return Ok(self.finish(Outcome::Forfeit { offender }, &mut on_event));
            };

            let mark = self.players[current].mark();
            if !self.board.claim(position, mark)? {
                bail!("Claim at {position} was rejected after it validated");
            }

            let mov = Move::new(mark, position);
            self.record.moves.push(mov);
            debug!(%mov, "Move applied");

            on_event(&GameEvent::MoveMade {
                player: self.players[current].name().to_string(),
                mov,
            });
            on_event(&GameEvent::StateChanged(self.board.to_string()));

            current = 1 - current;
        }

        let outcome = match self.board.winner() {
            Some(mark) => Outcome::Winner(mark),
            None => Outcome::Draw,
        };
        Ok(self.finish(outcome, &mut on_event))
    }

    /// Asks the current player until it proposes a valid move.
    ///
    /// Returns `None` once the player's invalid proposals exceed the budget.
    fn next_valid_move(
        &mut self,
        current: usize,
        on_event: &mut impl FnMut(&GameEvent),
    ) -> Result<Option<usize>> {
        let mut attempts = 0;
        loop {
            let proposal = match self.players[current].select_move(&self.board) {
                Ok(position) if self.board.is_valid_move(position) => return Ok(Some(position)),
                Ok(position) => Some(position),
                Err(SelectError::InvalidInput(entry)) => {
                    debug!(%entry, "Unparseable move");
                    None
                }
                Err(err) => return Err(err.into()),
            };

            attempts += 1;
            let player = self.players[current].name().to_string();
            warn!(%player, position = ?proposal, attempts, "Invalid move proposed");
            on_event(&GameEvent::InvalidMove {
                player,
                position: proposal,
                attempts,
            });

            if attempts > self.max_invalid_moves {
                return Ok(None);
            }
        }
    }

    fn finish(&mut self, outcome: Outcome, on_event: &mut impl FnMut(&GameEvent)) -> Outcome {
        let winner = outcome
            .winner()
            .and_then(|mark| self.player_name(mark))
            .map(str::to_string);
        info!(%outcome, ?winner, moves = self.record.moves.len(), "Game over");

        self.record.outcome = Some(outcome);
        on_event(&GameEvent::GameOver { outcome, winner });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Strategy;
    use crate::players::{AiPlayer, HumanPlayer};
    use std::io::Cursor;

    fn human(name: &str, mark: Mark, script: &'static str) -> Box<dyn Player> {
        Box::new(HumanPlayer::new(name, mark, Cursor::new(script), std::io::sink()))
    }

    #[test]
    fn test_rejects_duplicate_marks() {
        let result = Orchestrator::new(
            Board::default(),
            human("a", Mark::X, ""),
            human("b", Mark::X, ""),
            DEFAULT_MAX_INVALID_MOVES,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scripted_win() {
        let mut game = Orchestrator::new(
            Board::default(),
            human("Alice", Mark::X, "1\n2\n3\n"),
            human("Bob", Mark::O, "4\n5\n"),
            DEFAULT_MAX_INVALID_MOVES,
        )
        .unwrap();

        let mut events = Vec::new();
        let outcome = game.run(|event| events.push(event.clone())).unwrap();

        assert_eq!(outcome, Outcome::Winner(Mark::X));
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                outcome: Outcome::Winner(Mark::X),
                winner: Some("Alice".to_string()),
            })
        );
        let positions: Vec<usize> = game.record().moves.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 4, 2, 5, 3]);
    }

    #[test]
    fn test_invalid_moves_are_retried() {
        let mut game = Orchestrator::new(
            Board::default(),
            human("Alice", Mark::X, "0\nabc\n1\n2\n3\n"),
            human("Bob", Mark::O, "1\n4\n5\n"),
            DEFAULT_MAX_INVALID_MOVES,
        )
        .unwrap();

        let mut invalid = Vec::new();
        let outcome = game
            .run(|event| {
                if let GameEvent::InvalidMove { position, .. } = event {
                    invalid.push(*position);
                }
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Winner(Mark::X));
        assert_eq!(invalid, vec![Some(0), None, Some(1)]);
    }

    #[test]
    fn test_budget_exceeded_forfeits() {
        let mut game = Orchestrator::new(
            Board::default(),
            human("Alice", Mark::X, "0\n0\n0\n0\n1\n"),
            Box::new(AiPlayer::seeded("AI", Mark::O, Strategy::Greedy, 1)),
            DEFAULT_MAX_INVALID_MOVES,
        )
        .unwrap();

        let outcome = game.run(|_| {}).unwrap();
        assert_eq!(outcome, Outcome::Forfeit { offender: Mark::X });
        assert_eq!(game.record().outcome, Some(outcome));
        assert!(game.record().moves.is_empty());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut game = Orchestrator::new(
            Board::default(),
            human("Alice", Mark::X, "5\n"),
            human("Bob", Mark::O, ""),
            DEFAULT_MAX_INVALID_MOVES,
        )
        .unwrap();

        assert!(game.run(|_| {}).is_err());
        assert_eq!(game.board().move_count(), 1);
    }
}
