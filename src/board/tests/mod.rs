//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts
//! - `draw.rs` - Repetition detection
//! - `make_unmake.rs` - Mutations, `process` and scoped moves
//! - `edge_cases.rs` - En passant, castling, promotion and move statuses
//! - `eval.rs` - Evaluation terms
//! - `search.rs` - Alpha-beta, transposition table, killers, cancellation
//! - `proptest.rs` - Property-based tests

mod search;

use super::{Board, Color, Move, Square};

pub(super) fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

/// Hash rebuilt from scratch out of the occupancy array.
pub(super) fn recompute_hash(board: &Board) -> u64 {
    Square::all()
        .filter_map(|s| board.piece_at(s).map(|p| board.zobrist().key(p, s)))
        .fold(0, |acc, key| acc ^ key)
}

/// Occupancy, piece lists, reverse index and hash agree with each other.
pub(super) fn assert_consistent(board: &Board) {
    for color in Color::BOTH {
        let list = board.pieces(color);
        for (slot, &s) in list.iter().enumerate() {
            let piece = board.piece_at(s).expect("listed square is occupied");
            assert_eq!(piece.color, color);
            assert_eq!(board.list_slot[s.index()] as usize, slot);
        }
    }
    let occupied = Square::all().filter(|&s| !board.is_empty(s)).count();
    assert_eq!(
        occupied,
        board.pieces(Color::White).len() + board.pieces(Color::Black).len()
    );
    assert_eq!(board.hash(), recompute_hash(board));
}

/// Legal move written in notation, panicking when absent.
pub(super) fn legal(board: &mut Board, notation: &str) -> Move {
    super::parse_move(board, notation).unwrap_or_else(|err| panic!("{notation}: {err}"))
}

/// Notation of every legal move, sorted.
pub(super) fn legal_notations(board: &mut Board) -> Vec<String> {
    let mut all: Vec<String> = board
        .valid_moves()
        .expect("consistent board")
        .iter()
        .map(ToString::to_string)
        .collect();
    all.sort();
    all
}
