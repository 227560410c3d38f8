//! Automated player backed by a move-selection strategy.

use super::Player;
use crate::games::tictactoe::{Board, Mark, SelectError, Strategy};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// AI player that picks squares with a [`Strategy`].
#[derive(Debug, Clone)]
pub struct AiPlayer {
    name: String,
    mark: Mark,
    strategy: Strategy,
    rng: StdRng,
}

impl AiPlayer {
    /// Creates an AI player seeded from the operating system.
    pub fn new(name: impl Into<String>, mark: Mark, strategy: Strategy) -> Self {
        Self::with_rng(name, mark, strategy, StdRng::from_os_rng())
    }

    /// Creates an AI player whose random choices are reproducible.
    pub fn seeded(name: impl Into<String>, mark: Mark, strategy: Strategy, seed: u64) -> Self {
        Self::with_rng(name, mark, strategy, StdRng::seed_from_u64(seed))
    }

    /// Creates an AI player drawing from the given generator.
    pub fn with_rng(name: impl Into<String>, mark: Mark, strategy: Strategy, rng: StdRng) -> Self {
        let name = name.into();
        info!(ai = %name, %mark, %strategy, "Creating AI player");
        Self {
            name,
            mark,
            strategy,
            rng,
        }
    }

    /// Returns the strategy this player uses.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl Player for AiPlayer {
    #[instrument(skip(self, board), fields(ai = %self.name, strategy = %self.strategy))]
    fn select_move(&mut self, board: &Board) -> Result<usize, SelectError> {
        let position = self.strategy.select_move(board, &mut self.rng)?;
        debug!(position, "AI chose position");
        Ok(position)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }
}
