//! Game configuration loaded from TOML.

use crate::games::tictactoe::{DEFAULT_SIZE, Strategy};
use crate::orchestrator::DEFAULT_MAX_INVALID_MOVES;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a game session.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length.
    board_size: usize,

    /// Strategy used by the AI player.
    strategy: Strategy,

    /// Invalid proposals tolerated per turn before the game is stopped.
    max_invalid_moves: usize,

    /// Seed for reproducible random play; OS entropy when unset.
    seed: Option<u64>,

    /// Display name of the human player.
    human_name: String,

    /// Display name of the AI player.
    ai_name: String,

    /// Whether the human moves first (as X).
    human_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_SIZE,
            strategy: Strategy::default(),
            max_invalid_moves: DEFAULT_MAX_INVALID_MOVES,
            seed: None,
            human_name: "Human".to_string(),
            ai_name: "AI".to_string(),
            human_first: true,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            board_size = config.board_size,
            strategy = %config.strategy,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Overrides the AI strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Overrides the invalid-move budget.
    pub fn with_max_invalid_moves(mut self, max_invalid_moves: usize) -> Self {
        self.max_invalid_moves = max_invalid_moves;
        self
    }

    /// Overrides the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides who moves first.
    pub fn with_human_first(mut self, human_first: bool) -> Self {
        self.human_first = human_first;
        self
    }

    /// Checks values that deserialization alone cannot rule out.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size <= 1 {
            return Err(ConfigError::new(format!(
                "board_size must be greater than 1 (got {})",
                self.board_size
            )));
        }
        if self.human_name == self.ai_name {
            return Err(ConfigError::new(format!(
                "human_name and ai_name must differ (both {:?})",
                self.human_name
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
