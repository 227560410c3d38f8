//! nxn_tictactoe - generalized tic-tac-toe with constant-time win detection
//!
//! The board keeps a signed running sum for every row, column and both
//! diagonals (X counts +1, O counts -1). A line is complete exactly when its
//! sum reaches ±size, so each claim decides the game in constant time, and
//! the same sums drive the heuristic AI players.
//!
//! # Architecture
//!
//! - **Games**: `Board`, `Mark`, `Strategy` (RANDOM, GREEDY, EVIL)
//! - **Players**: move sources for humans and AI
//! - **Orchestrator**: turn loop with an invalid-move budget
//! - **Config**: TOML settings with CLI overrides
//!
//! # Example
//!
//! ```
//! use nxn_tictactoe::{Board, Mark, Strategy};
//! use rand::SeedableRng;
//!
//! let mut board = Board::new(3)?;
//! board.claim(5, Mark::X)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let reply = Strategy::Evil.select_move(&board, &mut rng)?;
//! assert!(board.claim(reply, Mark::O)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod orchestrator;
mod players;
mod record;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, BoardError, DEFAULT_SIZE, Mark, Move, SelectError, Square, Strategy, check_playable,
};

// Crate-level exports - Players
pub use players::{AiPlayer, HumanPlayer, Player};

// Crate-level exports - Orchestration
pub use orchestrator::{DEFAULT_MAX_INVALID_MOVES, GameEvent, Orchestrator};
pub use record::{GameRecord, Outcome};
