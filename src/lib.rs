//! Chess engine core built around a move tree.
//!
//! - [`board`]: position, move tree, move generation, legality, evaluation and
//!   the alpha-beta search
//! - [`book`]: opening book in front of any move selector
//! - [`tt`]: transposition table
//! - [`zobrist`]: position hashing

pub mod board;
pub mod book;
pub mod sync;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, Move, Piece, SearchEngine, SearchParams, Square};
pub use book::{MoveSelector, OpeningBook};
pub use tt::{NodeKey, TranspositionTable};
