use serde::Deserialize;

use arbor_chess::board::{Board, MoveStatus, NoProgress, SearchEngine, SearchParams};

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    #[serde(rename = "type")]
    kind: String,
    fen: String,
    moves: String,
}

fn problems() -> Vec<Problem> {
    let data = include_str!("data/problems.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid problems.json");
    set.problems
}

#[test]
fn mate_in_one_solutions_are_mate() {
    for problem in problems().iter().filter(|p| p.kind == "Mate in One") {
        let mut board = Board::from_fen(&problem.fen).expect("valid FEN");
        board
            .play_notation(&problem.moves)
            .unwrap_or_else(|err| panic!("{}: {err}", problem.fen));
        assert_eq!(
            board.current_move().status(),
            MoveStatus::CheckMate,
            "mate in one failed for fen: {} move: {}",
            problem.fen,
            problem.moves
        );
    }
}

#[test]
fn mate_in_one_suite() {
    let mut engine = SearchEngine::new(SearchParams::default());
    for problem in problems().iter().filter(|p| p.kind == "Mate in One") {
        let mut board = Board::from_fen(&problem.fen).expect("valid FEN");
        let player = board.to_move();
        let outcome = engine
            .next_move(&mut board, player, 2, &NoProgress)
            .expect("search succeeds");
        assert_eq!(
            outcome.best.status(),
            MoveStatus::CheckMate,
            "fen: {} got: {}",
            problem.fen,
            outcome.best
        );
        assert!(outcome.value.abs() > 90_000, "fen: {} value {}", problem.fen, outcome.value);
    }
}

#[test]
#[ignore]
fn mate_search_suite() {
    let limit = std::env::var("MATE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());
    let mut engine = SearchEngine::new(SearchParams::default());
    let mut failures = 0;

    for (checked, problem) in problems().iter().enumerate() {
        if limit.is_some_and(|limit| checked >= limit) {
            break;
        }
        let depth = match problem.kind.as_str() {
            "Mate in One" => 2,
            "Mate in Two" => 4,
            "Mate in Three" => 6,
            _ => continue,
        };
        let mut board = Board::from_fen(&problem.fen).expect("valid FEN");
        let player = board.to_move();
        let Ok(outcome) = engine.next_move(&mut board, player, depth, &NoProgress) else {
            failures += 1;
            eprintln!("Mismatch: type={} fen={} no move", problem.kind, problem.fen);
            continue;
        };

        let mut replay = board.clone();
        let mut mated = false;
        for mv in &outcome.line {
            if replay.play(mv).is_err() {
                break;
            }
            mated = replay.current_move().status() == MoveStatus::CheckMate;
        }
        if !mated || outcome.value.abs() < 90_000 {
            failures += 1;
            eprintln!(
                "Mismatch: type={} fen={} expected={} got={} value={}",
                problem.kind, problem.fen, problem.moves, outcome.best, outcome.value
            );
        }
    }

    assert_eq!(failures, 0, "mate search mismatches: {}", failures);
}
