//! Command-line interface for nxn_tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// N×N tic-tac-toe against heuristic AI players
#[derive(Parser, Debug)]
#[command(name = "nxn_tictactoe")]
#[command(about = "N x N tic-tac-toe with RANDOM, GREEDY and EVIL AI players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the AI in the terminal
    Play {
        /// AI algorithm: RANDOM, GREEDY or EVIL. Unknown names fall back to RANDOM.
        algorithm: Option<String>,

        #[command(flatten)]
        common: CommonArgs,

        /// Invalid moves tolerated per turn before the game is stopped
        #[arg(long)]
        max_invalid_moves: Option<usize>,

        /// Let the AI move first (the human plays O)
        #[arg(long, conflicts_with = "human_first")]
        ai_first: bool,

        /// Let the human move first (the human plays X)
        #[arg(long)]
        human_first: bool,
    },

    /// Watch two AI players play each other
    Watch {
        /// Algorithm for X
        #[arg(long, default_value = "RANDOM")]
        x_strategy: String,

        /// Algorithm for O
        #[arg(long, default_value = "GREEDY")]
        o_strategy: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Options shared by every command.
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Board side length
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Seed for reproducible random play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the finished game as JSON to this path
    #[arg(long)]
    pub record: Option<PathBuf>,
}
