//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use arbor_chess::board::{BoardBuilder, Color, Piece, Square};
//!
//! let e1: Square = "e1".parse().unwrap();
//! let e8: Square = "e8".parse().unwrap();
//! let board = BoardBuilder::new()
//!     .piece(e1, Color::White, Piece::King)
//!     .piece(e8, Color::Black, Piece::King)
//!     .side_to_move(Color::Black)
//!     .build();
//! assert_eq!(board.to_move(), Color::Black);
//! ```

use std::sync::Arc;

use crate::zobrist::ZobristTable;

use super::{Board, Color, Piece, PlayerPiece, Square};

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, PlayerPiece)>,
    side_to_move: Color,
    game_ply: u32,
    // squares whose pieces count as moved before this position
    moved: u64,
    zobrist: Option<Arc<ZobristTable>>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            game_ply: 0,
            moved: 0,
            zobrist: None,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            for color in Color::BOTH {
                let rank = color.back_rank();
                let pawn_rank = color.pawn_start_rank();
                builder
                    .pieces
                    .push((Square::at(file, rank), PlayerPiece::new(color, piece)));
                builder
                    .pieces
                    .push((Square::at(file, pawn_rank), PlayerPiece::new(color, Piece::Pawn)));
            }
        }
        builder
    }

    /// Place a piece on the board, replacing whatever stood there.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, PlayerPiece::new(color, piece)));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set how many plies of the game were played before this position.
    #[must_use]
    pub const fn game_ply(mut self, ply: u32) -> Self {
        self.game_ply = ply;
        self
    }

    /// Treat the piece on `square` as having moved before this position, so
    /// it cannot take part in castling.
    #[must_use]
    pub const fn moved(mut self, square: Square) -> Self {
        self.moved |= 1 << square.index();
        self
    }

    /// Share an existing key table instead of creating one.
    #[must_use]
    pub fn zobrist(mut self, table: Arc<ZobristTable>) -> Self {
        self.zobrist = Some(table);
        self
    }

    /// Build the board.
    #[must_use]
    pub fn build(self) -> Board {
        let zobrist = self.zobrist.unwrap_or_else(ZobristTable::shared);
        let mut board = Board::empty_with(zobrist, self.side_to_move, self.game_ply);
        board.setup_moved = self.moved;
        for (square, piece) in self.pieces {
            board.put(square, piece);
        }
        board.reset_repetitions();
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_has_32_pieces() {
        let board = BoardBuilder::starting_position().build();
        assert_eq!(board.pieces(Color::White).len(), 16);
        assert_eq!(board.pieces(Color::Black).len(), 16);
        assert_eq!(board.king_square(Color::Black), "e8".parse().ok());
        assert_eq!(board.repetitions(), 1);
    }

    #[test]
    fn test_piece_replaces_occupant() {
        let sq: Square = "d4".parse().unwrap();
        let board = BoardBuilder::new()
            .piece(sq, Color::White, Piece::Knight)
            .piece(sq, Color::Black, Piece::Queen)
            .build();
        assert_eq!(board.piece_at(sq), Some(PlayerPiece::new(Color::Black, Piece::Queen)));
        assert!(board.pieces(Color::White).is_empty());
    }

    #[test]
    fn test_builder_matches_board_new() {
        assert_eq!(BoardBuilder::starting_position().build(), Board::new());
    }
}
