//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for repetition
//! detection and the transposition table. The key table is an explicit value:
//! build it once and share it between boards through an `Arc`.

use std::sync::Arc;

use rand::prelude::*;

use crate::board::{Color, PlayerPiece, Square};

/// Seed used by [`ZobristTable::default`].
pub const DEFAULT_SEED: u64 = 1_234_567_890;

/// High bit reserved for the side to move in position keys.
pub(crate) const SIDE_TO_MOVE_BIT: u64 = 1 << 63;

/// Random keys per (player-piece, square).
///
/// Keys never use bit 63, so a piece-layout hash can carry the side to move
/// in that bit without colliding with another layout.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    // piece_keys[player_piece_index][square_index]
    piece_keys: [[u64; 64]; 12],
}

impl ZobristTable {
    /// Build a table from a fixed seed (reproducible across runs).
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = [[0; 64]; 12];
        for piece in &mut piece_keys {
            for key in piece.iter_mut() {
                *key = rng.gen::<u64>() & !SIDE_TO_MOVE_BIT;
            }
        }
        ZobristTable { piece_keys }
    }

    /// A default table ready to hand to several boards.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[inline]
    #[must_use]
    pub fn key(&self, piece: PlayerPiece, square: Square) -> u64 {
        self.piece_keys[piece.index()][square.index()]
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Fold the side to move into a layout hash.
#[inline]
#[must_use]
pub fn position_key(hash: u64, to_move: Color) -> u64 {
    match to_move {
        Color::White => hash & !SIDE_TO_MOVE_BIT,
        Color::Black => hash | SIDE_TO_MOVE_BIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn test_same_seed_same_keys() {
        let a = ZobristTable::new(7);
        let b = ZobristTable::new(7);
        let knight = PlayerPiece::new(Color::White, Piece::Knight);
        let sq: Square = "c3".parse().unwrap();
        assert_eq!(a.key(knight, sq), b.key(knight, sq));
    }

    #[test]
    fn test_keys_leave_side_bit_clear() {
        let table = ZobristTable::default();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in Square::all() {
                    let key = table.key(PlayerPiece::new(color, piece), sq);
                    assert_eq!(key & SIDE_TO_MOVE_BIT, 0);
                }
            }
        }
    }

    #[test]
    fn test_position_key_separates_side_to_move() {
        let hash = 0x1234_5678;
        assert_ne!(position_key(hash, Color::White), position_key(hash, Color::Black));
    }
}
