//! nxn_tictactoe - terminal entry point
//!
//! Plays a human against one of the AI strategies, or two AIs against
//! each other.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, CommonArgs};
use nxn_tictactoe::{
    AiPlayer, Board, GameConfig, GameEvent, HumanPlayer, Mark, Orchestrator, Outcome, Player,
    Strategy,
};
use std::str::FromStr;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            algorithm,
            common,
            max_invalid_moves,
            ai_first,
            human_first,
        } => {
            let mut config = load_config(&common)?;
            if let Some(name) = algorithm {
                config = config.with_strategy(parse_strategy(&name));
            }
            if let Some(budget) = max_invalid_moves {
                config = config.with_max_invalid_moves(budget);
            }
            if ai_first || human_first {
                config = config.with_human_first(human_first);
            }
            run_play(&config, &common)
        }
        Command::Watch {
            x_strategy,
            o_strategy,
            common,
        } => {
            let config = load_config(&common)?;
            run_watch(
                &config,
                parse_strategy(&x_strategy),
                parse_strategy(&o_strategy),
                &common,
            )
        }
    }
}

/// Reads the config file, if any, and applies the shared CLI overrides.
#[instrument(skip(common))]
fn load_config(common: &CommonArgs) -> Result<GameConfig> {
    let mut config = match &common.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = common.size {
        config = config.with_board_size(size);
    }
    if let Some(seed) = common.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Parses an algorithm name, falling back to RANDOM for unknown names.
fn parse_strategy(name: &str) -> Strategy {
    Strategy::from_str(name).unwrap_or_else(|_| {
        warn!(name, "Unknown algorithm, using RANDOM");
        println!(
            "If attempting to specify algorithm for AI Player, please input either [RANDOM] \
             [EVIL], or [GREEDY]. Defaulting to RANDOM."
        );
        Strategy::Random
    })
}

fn ai_player(name: &str, mark: Mark, strategy: Strategy, seed: Option<u64>) -> AiPlayer {
    match seed {
        Some(seed) => AiPlayer::seeded(name, mark, strategy, seed),
        None => AiPlayer::new(name, mark, strategy),
    }
}

/// Human against AI.
#[instrument(skip_all, fields(strategy = %config.strategy()))]
fn run_play(config: &GameConfig, common: &CommonArgs) -> Result<()> {
    let board = Board::new(*config.board_size())?;
    let (human_mark, ai_mark) = if *config.human_first() {
        (Mark::X, Mark::O)
    } else {
        (Mark::O, Mark::X)
    };

    let human: Box<dyn Player> = Box::new(HumanPlayer::new(
        config.human_name().as_str(),
        human_mark,
        std::io::stdin().lock(),
        std::io::stdout(),
    ));
    let ai: Box<dyn Player> = Box::new(ai_player(
        config.ai_name(),
        ai_mark,
        *config.strategy(),
        *config.seed(),
    ));

    let (first, second) = if *config.human_first() {
        (human, ai)
    } else {
        (ai, human)
    };
    run_game(board, first, second, *config.max_invalid_moves(), common)
}

/// AI against AI.
#[instrument(skip(config, common))]
fn run_watch(
    config: &GameConfig,
    x_strategy: Strategy,
    o_strategy: Strategy,
    common: &CommonArgs,
) -> Result<()> {
    let board = Board::new(*config.board_size())?;
    // Offset O's seed so a seeded mirror match does not replay X's choices.
    let x = ai_player("X", Mark::X, x_strategy, *config.seed());
    let o = ai_player("O", Mark::O, o_strategy, config.seed().map(|s| s.wrapping_add(1)));
    run_game(
        board,
        Box::new(x),
        Box::new(o),
        *config.max_invalid_moves(),
        common,
    )
}

fn run_game(
    board: Board,
    first: Box<dyn Player>,
    second: Box<dyn Player>,
    max_invalid_moves: usize,
    common: &CommonArgs,
) -> Result<()> {
    let names = [
        (first.mark(), first.name().to_string()),
        (second.mark(), second.name().to_string()),
    ];
    let name_of = |mark: Mark| {
        names
            .iter()
            .find(|(m, _)| *m == mark)
            .map(|(_, name)| name.as_str())
            .unwrap_or("Unknown")
    };

    let mut game = Orchestrator::new(board, first, second, max_invalid_moves)?;
    let outcome = game.run(|event| match event {
        GameEvent::StateChanged(board) => println!("Game board: \n{board}"),
        GameEvent::MoveMade { player, mov } => println!("{player} plays {}", mov.position),
        GameEvent::InvalidMove { .. } => println!("Please enter a valid move!"),
        GameEvent::GameOver { outcome, .. } => match outcome {
            Outcome::Winner(mark) => println!("{} player wins!", name_of(*mark)),
            Outcome::Draw => println!("Game ends in a draw. Better luck next time!"),
            Outcome::Forfeit { offender } => println!(
                "{} made more than {max_invalid_moves} illegal moves. Ending the game. \
                 You should really take this more seriously.",
                name_of(*offender)
            ),
        },
    })?;
    info!(%outcome, "Finished");

    if let Some(path) = &common.record {
        let json = game.record().to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write game record to {}", path.display()))?;
        info!(path = %path.display(), "Game record written");
    }

    Ok(())
}
