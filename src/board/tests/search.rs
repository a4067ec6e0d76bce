//! Alpha-beta against a reference minimax, caching, killers, cancellation.

use std::cell::Cell;

use crate::board::{
    Board, BoardError, Color, Evaluator, Move, MoveStatus, NoProgress, SearchEngine, SearchError,
    SearchMonitor, SearchParams, SearchProgress,
};

const SCHOLAR: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w";
const POS3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w";

/// Full-width minimax without pruning, scoring like the engine does.
fn minimax(board: &mut Board, eval: &Evaluator, ply: u32, depth: u32) -> i32 {
    let status = board.current_move().status();
    if status.is_terminal() || ply >= depth {
        return eval.evaluate(board, status, ply);
    }
    let moves = board.valid_moves().unwrap();
    if moves.is_empty() {
        return eval.evaluate(board, status, ply);
    }
    let maximizing = board.to_move() == Color::White;
    let values = moves.iter().map(|mv| {
        board
            .temporarily_move(mv, |b| Ok::<_, BoardError>(minimax(b, eval, ply + 1, depth)))
            .unwrap()
    });
    let values: Vec<i32> = values.collect();
    if maximizing {
        values.into_iter().max().unwrap_or_default()
    } else {
        values.into_iter().min().unwrap_or_default()
    }
}

fn root_minimax(fen: &str, depth: u32) -> i32 {
    let mut board = Board::from_fen(fen).unwrap();
    minimax(&mut board, &Evaluator::new(), 0, depth)
}

fn plain_value(fen: &str, depth: u32, params: SearchParams) -> (i32, u64) {
    let mut board = Board::from_fen(fen).unwrap();
    let mut engine = SearchEngine::new(params);
    let player = board.to_move();
    let outcome = engine.next_move(&mut board, player, depth, &NoProgress).unwrap();
    (outcome.value, outcome.nodes)
}

#[test]
fn test_alpha_beta_matches_minimax() {
    for (fen, depth) in [(SCHOLAR, 2), (POS3, 3), ("4k3/8/8/8/8/8/4q3/R3K3 w", 2)] {
        let (value, _) = plain_value(fen, depth, SearchParams::plain());
        assert_eq!(value, root_minimax(fen, depth), "{fen} depth {depth}");
    }
}

#[test]
fn test_black_minimizes() {
    let fen = "r3k3/8/8/8/8/8/4Q3/4K3 b";
    let (value, _) = plain_value(fen, 2, SearchParams::plain());
    assert_eq!(value, root_minimax(fen, 2));
}

#[test]
fn test_transpositions_do_not_change_value() {
    let cached = SearchParams {
        use_transpositions: true,
        ..SearchParams::plain()
    };
    for fen in [SCHOLAR, POS3] {
        let (with, _) = plain_value(fen, 3, cached.clone());
        let (without, _) = plain_value(fen, 3, SearchParams::plain());
        assert_eq!(with, without, "{fen}");
    }
}

#[test]
fn test_repeated_search_hits_cache() {
    let mut board = Board::from_fen(POS3).unwrap();
    let mut engine = SearchEngine::new(SearchParams {
        use_transpositions: true,
        ..SearchParams::plain()
    });
    let first = engine.next_move(&mut board, Color::White, 3, &NoProgress).unwrap();
    let second = engine.next_move(&mut board, Color::White, 3, &NoProgress).unwrap();
    assert_eq!(first.value, second.value);
    assert!(second.tt_hits > 0);
    assert!(second.nodes < first.nodes);
}

#[test]
fn test_cache_not_reused_across_depths() {
    let mut board = Board::from_fen(SCHOLAR).unwrap();
    let mut engine = SearchEngine::new(SearchParams {
        use_transpositions: true,
        ..SearchParams::plain()
    });
    engine.next_move(&mut board, Color::White, 2, &NoProgress).unwrap();
    let deeper = engine.next_move(&mut board, Color::White, 3, &NoProgress).unwrap();
    assert_eq!(deeper.value, root_minimax(SCHOLAR, 3));
}

#[test]
fn test_killers_do_not_change_value() {
    let with_killers = SearchParams {
        use_killers: true,
        ..SearchParams::plain()
    };
    let (with, _) = plain_value(POS3, 3, with_killers);
    let (without, _) = plain_value(POS3, 3, SearchParams::plain());
    assert_eq!(with, without);
}

#[test]
fn test_full_search_finds_mate() {
    let mut board = Board::from_fen(SCHOLAR).unwrap();
    let mut engine = SearchEngine::default();
    let outcome = engine.next_move(&mut board, Color::White, 2, &NoProgress).unwrap();
    assert_eq!(outcome.best.to_string(), "Qf3xf7++");
    assert_eq!(outcome.best.status(), MoveStatus::CheckMate);
    assert!(outcome.value > 90_000);
    assert_eq!(outcome.line.first(), Some(&outcome.best));
}

#[test]
fn test_search_leaves_board_untouched() {
    let mut board = Board::from_fen(SCHOLAR).unwrap();
    let fen = board.to_fen();
    let hash = board.hash();
    let mut engine = SearchEngine::default();
    let outcome = engine.next_move(&mut board, Color::White, 3, &NoProgress).unwrap();
    assert_eq!(board.to_fen(), fen);
    assert_eq!(board.hash(), hash);
    assert_eq!(board.tree().len(), 1);
    assert_eq!(board.node_value(board.current()), Some(outcome.value));
}

#[test]
fn test_wrong_player_is_rejected() {
    let mut board = Board::new();
    let mut engine = SearchEngine::default();
    assert_eq!(
        engine.next_move(&mut board, Color::Black, 2, &NoProgress),
        Err(SearchError::NotToMove {
            player: Color::Black
        })
    );
}

#[test]
fn test_no_legal_moves() {
    let mut board = Board::from_fen("7k/6Q1/5K2/8/8/8/8/8 b").unwrap();
    let mut engine = SearchEngine::default();
    assert_eq!(
        engine.next_move(&mut board, Color::Black, 2, &NoProgress),
        Err(SearchError::NoLegalMoves)
    );
}

#[test]
fn test_cancelled_before_start() {
    let mut board = Board::new();
    let monitor = SearchMonitor::new();
    monitor.cancel();
    let mut engine = SearchEngine::default();
    let result = engine.next_move(&mut board, Color::White, 3, &monitor);
    assert_eq!(result, Err(SearchError::Cancelled));
    assert_eq!(board, Board::new());
    assert_eq!(board.tree().len(), 1);
}

/// Cancels itself after a number of progress reports.
struct CancelAfter {
    reports: Cell<u32>,
    limit: u32,
    cancelled: Cell<bool>,
}

impl SearchProgress for CancelAfter {
    fn report_progress(&self, _percent: u8) {
        self.reports.set(self.reports.get() + 1);
        if self.reports.get() >= self.limit {
            self.cancel();
        }
    }

    fn report_best_line(&self, _line: &[Move]) {}

    fn cancel(&self) {
        self.cancelled.set(true);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[test]
fn test_cancelled_mid_search_restores_board() {
    let mut board = Board::from_fen(SCHOLAR).unwrap();
    let fen = board.to_fen();
    let progress = CancelAfter {
        reports: Cell::new(0),
        limit: 5,
        cancelled: Cell::new(false),
    };
    let mut engine = SearchEngine::default();
    let result = engine.next_move(&mut board, Color::White, 4, &progress);
    assert_eq!(result, Err(SearchError::Cancelled));
    assert_eq!(board.to_fen(), fen);
    assert_eq!(board.tree().len(), 1);
}

#[test]
fn test_repeated_search_on_one_board_is_identical() {
    let mut board = Board::from_fen(POS3).unwrap();
    let mut engine = SearchEngine::new(SearchParams::plain());
    let first = engine.next_move(&mut board, Color::White, 2, &NoProgress).unwrap();
    let second = engine.next_move(&mut board, Color::White, 2, &NoProgress).unwrap();
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.value, second.value);
    assert_eq!(first.best, second.best);
}

#[test]
fn test_depth_adjustment_shrinks_budget() {
    let mut board = Board::from_fen(POS3).unwrap();
    let mut engine = SearchEngine::new(SearchParams::plain());
    let monitor = SearchMonitor::new();
    monitor.set_depth_adjustment(-1);
    let adjusted = engine.next_move(&mut board, Color::White, 3, &monitor).unwrap();
    let shallow = engine.next_move(&mut board, Color::White, 2, &NoProgress).unwrap();
    assert_eq!(adjusted.nodes, shallow.nodes);
    assert_eq!(adjusted.value, shallow.value);
}

#[test]
fn test_monitor_sees_completion_and_line() {
    let mut board = Board::new();
    let monitor = SearchMonitor::new();
    let mut engine = SearchEngine::default();
    let outcome = engine.next_move(&mut board, Color::White, 2, &monitor).unwrap();
    assert_eq!(monitor.percent(), 100);
    assert_eq!(monitor.best_line(), outcome.line);
}

#[test]
fn test_quiescence_sees_recapture() {
    // Qxd5 wins a pawn at depth 1 but the queen is lost to ...exd5 in the
    // capture extension.
    let fen = "4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 30";
    let mut board = Board::from_fen(fen).unwrap();
    let mut engine = SearchEngine::new(SearchParams {
        quiescence: true,
        ..SearchParams::plain()
    });
    let outcome = engine.next_move(&mut board, Color::White, 1, &NoProgress).unwrap();
    assert_ne!(outcome.best.to_string(), "Qd1xd5");

    let mut greedy = SearchEngine::new(SearchParams::plain());
    let naive = greedy.next_move(&mut board, Color::White, 1, &NoProgress).unwrap();
    assert!(naive.value > outcome.value);
}
