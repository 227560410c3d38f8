//! End-to-end games driven through the orchestrator.

use nxn_tictactoe::{
    AiPlayer, Board, DEFAULT_MAX_INVALID_MOVES, GameEvent, HumanPlayer, Mark, Orchestrator,
    Outcome, Player, Strategy,
};
use std::io::Cursor;

fn scripted(name: &str, mark: Mark, script: &'static str) -> Box<dyn Player> {
    Box::new(HumanPlayer::new(name, mark, Cursor::new(script), std::io::sink()))
}

#[test]
fn test_scripted_draw() {
    let mut game = Orchestrator::new(
        Board::new(3).unwrap(),
        scripted("Xavier", Mark::X, "1\n3\n4\n8\n9\n"),
        scripted("Olive", Mark::O, "2\n5\n6\n7\n"),
        DEFAULT_MAX_INVALID_MOVES,
    )
    .unwrap();

    let mut game_over = None;
    let outcome = game
        .run(|event| {
            if let GameEvent::GameOver { outcome, winner } = event {
                game_over = Some((*outcome, winner.clone()));
            }
        })
        .unwrap();

    assert_eq!(outcome, Outcome::Draw);
    assert_eq!(game_over, Some((Outcome::Draw, None)));
    assert!(!game.board().has_moves_remaining());
    assert_eq!(game.record().moves.len(), 9);
}

#[test]
fn test_ai_first_against_scripted_human() {
    // GREEDY as X opens at 1, then always takes the lowest line total.
    let mut game = Orchestrator::new(
        Board::new(3).unwrap(),
        Box::new(AiPlayer::seeded("AI", Mark::X, Strategy::Greedy, 0)),
        scripted("Human", Mark::O, "5\n9\n3\n4\n"),
        DEFAULT_MAX_INVALID_MOVES,
    )
    .unwrap();

    let outcome = game.run(|_| {}).unwrap();
    let positions: Vec<usize> = game.record().moves.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![1, 5, 6, 9, 8, 3, 7, 4, 2]);
    assert_eq!(game.record().moves[0].mark, Mark::X);
    assert_eq!(outcome, Outcome::Draw);
    assert_eq!(game.record().outcome, Some(Outcome::Draw));
    assert_eq!(game.player_name(Mark::X), Some("AI"));
}

#[test]
fn test_ai_against_ai_terminates() {
    for (x, o) in [
        (Strategy::Random, Strategy::Greedy),
        (Strategy::Evil, Strategy::Random),
        (Strategy::Greedy, Strategy::Evil),
    ] {
        for size in 2..=6 {
            let mut game = Orchestrator::new(
                Board::new(size).unwrap(),
                Box::new(AiPlayer::seeded("X", Mark::X, x, 3)),
                Box::new(AiPlayer::seeded("O", Mark::O, o, 4)),
                DEFAULT_MAX_INVALID_MOVES,
            )
            .unwrap();

            let outcome = game.run(|_| {}).unwrap();
            match outcome {
                Outcome::Winner(mark) => {
                    assert!(game.board().is_won());
                    assert_eq!(game.board().last_mover(), Some(mark));
                }
                Outcome::Draw => assert!(!game.board().has_moves_remaining()),
                Outcome::Forfeit { .. } => panic!("AI players never propose invalid moves"),
            }

            // Marks alternate from X.
            for (i, mov) in game.record().moves.iter().enumerate() {
                let expected = if i % 2 == 0 { Mark::X } else { Mark::O };
                assert_eq!(mov.mark, expected);
            }
        }
    }
}

#[test]
fn test_zero_budget_forfeits_on_first_mistake() {
    let mut game = Orchestrator::new(
        Board::new(3).unwrap(),
        scripted("Human", Mark::X, "5\n"),
        scripted("Other", Mark::O, "5\n1\n"),
        0,
    )
    .unwrap();

    let mut events = Vec::new();
    let outcome = game.run(|event| events.push(event.clone())).unwrap();

    assert_eq!(outcome, Outcome::Forfeit { offender: Mark::O });
    assert_eq!(outcome.winner(), Some(Mark::X));
    assert!(events.contains(&GameEvent::InvalidMove {
        player: "Other".to_string(),
        position: Some(5),
        attempts: 1,
    }));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            outcome: Outcome::Forfeit { offender: Mark::O },
            winner: Some("Human".to_string()),
        })
    );
}

#[test]
fn test_budget_resets_each_turn() {
    // Three misses before each valid move stays within the default budget.
    let mut game = Orchestrator::new(
        Board::new(3).unwrap(),
        scripted("Human", Mark::X, "0\n0\n0\n1\n0\n0\n0\n2\n0\n0\n0\n3\n"),
        scripted("Other", Mark::O, "4\n5\n"),
        DEFAULT_MAX_INVALID_MOVES,
    )
    .unwrap();

    assert_eq!(game.run(|_| {}).unwrap(), Outcome::Winner(Mark::X));
}

#[test]
fn test_record_serializes_to_json() {
    let mut game = Orchestrator::new(
        Board::new(2).unwrap(),
        scripted("Human", Mark::X, "1\n3\n"),
        scripted("Other", Mark::O, "2\n"),
        DEFAULT_MAX_INVALID_MOVES,
    )
    .unwrap();
    game.run(|_| {}).unwrap();

    let json = game.record().to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["size"], 2);
    assert_eq!(value["players"][0], "Human");
    assert_eq!(value["moves"].as_array().unwrap().len(), 3);
    assert_eq!(value["outcome"]["Winner"], "X");
}

#[test]
fn test_rejects_used_board() {
    let mut board = Board::new(3).unwrap();
    board.claim(1, Mark::X).unwrap();
    let result = Orchestrator::new(
        board,
        scripted("Human", Mark::X, ""),
        scripted("Other", Mark::O, ""),
        DEFAULT_MAX_INVALID_MOVES,
    );
    assert!(result.is_err());
}
