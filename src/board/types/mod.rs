//! Core chess types.
//!
//! This module contains the value types used throughout the engine:
//! - `Piece`, `Color` and `PlayerPiece`
//! - `Square` - compact board square (`file * 8 + rank`)
//! - `BoardMutation` - atomic add/remove of a piece
//! - `Move`, `MoveStatus` and `MoveList`

mod moves;
mod mutation;
mod piece;
mod square;

pub use moves::{Move, MoveList, MoveStatus, MAX_MUTATIONS};
pub use mutation::{BoardMutation, MutationKind};
pub use piece::{Color, Piece, PlayerPiece};
pub use square::Square;

pub(crate) use moves::MAX_PLY;
pub(crate) use piece::PROMOTION_PIECES;
