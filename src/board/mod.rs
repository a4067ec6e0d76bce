//! Chess board representation and game logic.
//!
//! A [`Board`] keeps the position together with the tree of moves that led to
//! it. Moves are lists of add/remove mutations, so making and unmaking them is
//! symmetric, and jumping between any two nodes of the tree only replays the
//! moves between them and their common ancestor.
//!
//! # Example
//! ```
//! use arbor_chess::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.valid_moves().unwrap();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod builder;
mod error;
pub mod eval;
mod fen;
mod history;
mod legality;
mod make_unmake;
mod movegen;
pub mod notation;
mod search;
mod state;
mod tree;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::BoardBuilder;
pub use error::{BoardError, FenError, NotationError, SearchError, SquareError};
pub use eval::{Evaluator, GamePhase, Score};
pub use legality::REPETITION_DRAW_COUNT;
pub use make_unmake::MoveGuard;
pub use notation::{format_line, format_move, parse_move};
pub use state::Board;
pub use tree::{MoveTree, NodeId};
pub use types::{
    BoardMutation, Color, Move, MoveList, MoveStatus, MutationKind, Piece, PlayerPiece, Square,
    MAX_MUTATIONS,
};

// Public API - search and configuration
pub use search::{
    KillerTable, NoProgress, SearchEngine, SearchMonitor, SearchOutcome, SearchParams,
    SearchProgress, SearchStats, SCORE_INFINITY,
};

pub(crate) use types::{MAX_PLY, PROMOTION_PIECES};
