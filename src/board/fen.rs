use std::str::FromStr;
use std::sync::Arc;

use crate::zobrist::ZobristTable;

use super::error::FenError;
use super::{Board, BoardBuilder, Color, Piece, Square};

impl Board {
    /// Parse a position from FEN.
    ///
    /// Only the placement is required. Side to move defaults to White and the
    /// full-move number (sixth field) sets the game ply. A castling right
    /// missing from the third field marks that rook's corner as already
    /// moved; without the field every right is derived from the pieces. The
    /// en passant field is accepted but not used.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with(fen, ZobristTable::shared())
    }

    /// Like [`Board::from_fen`], sharing an existing key table.
    pub fn from_fen_with(fen: &str, zobrist: Arc<ZobristTable>) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let Some(placement) = parts.first() else {
            return Err(FenError::MissingPlacement);
        };

        let mut builder = BoardBuilder::new().zobrist(zobrist);
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if skip == 0 {
                        return Err(FenError::ZeroSkip { row });
                    }
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece { ch: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let square = Square::new(file, rank).ok_or(FenError::RankWidth {
                    row,
                    squares: file + 1,
                })?;
                builder = builder.piece(square, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::RankWidth { row, squares: file });
            }
        }

        let to_move = match parts.get(1).copied() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(FenError::BadSideToMove {
                    found: other.to_string(),
                })
            }
        };

        if let Some(&castling) = parts.get(2) {
            for corner in lost_castling_corners(castling)? {
                builder = builder.moved(corner);
            }
        }

        let full_moves = match parts.get(5) {
            Some(text) => match text.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(FenError::BadMoveNumber {
                        found: (*text).to_string(),
                    })
                }
            },
            None => 1,
        };
        let game_ply = (full_moves - 1) * 2 + u32::from(to_move == Color::Black);

        Ok(builder.side_to_move(to_move).game_ply(game_ply).build())
    }

    /// Placement and side to move in FEN form.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::at(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen.push_str(match self.to_move() {
            Color::White => " w",
            Color::Black => " b",
        });
        fen
    }
}

/// Rook corners whose castling right is absent from a FEN castling field.
fn lost_castling_corners(field: &str) -> Result<Vec<Square>, FenError> {
    const RIGHTS: [(char, usize, usize); 4] = [('K', 7, 0), ('Q', 0, 0), ('k', 7, 7), ('q', 0, 7)];
    let bad = || FenError::BadCastling {
        found: field.to_string(),
    };
    if field != "-" {
        let mut seen = Vec::with_capacity(4);
        for c in field.chars() {
            if !RIGHTS.iter().any(|&(right, _, _)| right == c) || seen.contains(&c) {
                return Err(bad());
            }
            seen.push(c);
        }
    }
    Ok(RIGHTS
        .iter()
        .filter(|&&(right, _, _)| !field.contains(right))
        .map(|&(_, file, rank)| Square::at(file, rank))
        .collect())
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_start_fen_matches_new_board() {
        let board = Board::from_fen(START).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(board.hash(), Board::new().hash());
        assert_eq!(board.game_ply(), 0);
    }

    #[test]
    fn test_placement_only() {
        let board: Board = "7k/5K2/8/8/8/8/8/6Q1".parse().unwrap();
        assert_eq!(board.to_move(), Color::White);
        assert_eq!(board.to_fen(), "7k/5K2/8/8/8/8/8/6Q1 w");
    }

    #[test]
    fn test_move_number_sets_game_ply() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 10").unwrap();
        assert_eq!(board.game_ply(), 19);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(Board::from_fen("  ").unwrap_err(), FenError::MissingPlacement);
        assert_eq!(Board::from_fen("8/8/8 w").unwrap_err(), FenError::RankCount { found: 3 });
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/7X w").unwrap_err(),
            FenError::UnknownPiece { ch: 'X' }
        );
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/8 x"),
            Err(FenError::BadSideToMove { .. })
        ));
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 zero"),
            Err(FenError::BadMoveNumber { .. })
        ));
        assert_eq!(
            Board::from_fen("9/8/8/8/8/8/8/8").unwrap_err(),
            FenError::RankWidth { row: 0, squares: 9 }
        );
        assert!(matches!(
            Board::from_fen("pppppppp1/8/8/8/8/8/8/8"),
            Err(FenError::RankWidth { row: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_short_ranks() {
        assert_eq!(
            Board::from_fen("7/8/8/8/8/8/8/8").unwrap_err(),
            FenError::RankWidth { row: 0, squares: 7 }
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K2").unwrap_err(),
            FenError::RankWidth { row: 7, squares: 7 }
        );
        assert_eq!(
            Board::from_fen("4k3/8/8/8/8/8/8/4K02").unwrap_err(),
            FenError::ZeroSkip { row: 7 }
        );
    }

    #[test]
    fn test_castling_field_is_honoured() {
        let mut none = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        let moves: Vec<String> = none.valid_moves().unwrap().iter().map(ToString::to_string).collect();
        assert!(!moves.iter().any(|m| m.starts_with("O-O")));

        let mut queenside = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1").unwrap();
        let moves: Vec<String> = queenside.valid_moves().unwrap().iter().map(ToString::to_string).collect();
        assert!(!moves.iter().any(|m| m == "O-O"));
        assert!(moves.iter().any(|m| m == "O-O-O"));

        let mut derived = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w").unwrap();
        let moves: Vec<String> = derived.valid_moves().unwrap().iter().map(ToString::to_string).collect();
        assert!(moves.iter().any(|m| m == "O-O"));
        assert!(moves.iter().any(|m| m == "O-O-O"));
    }

    #[test]
    fn test_rejects_bad_castling_field() {
        for field in ["KK", "x", "KQkqK", "-K"] {
            let fen = format!("4k3/8/8/8/8/8/8/R3K2R w {field} - 0 1");
            assert_eq!(
                Board::from_fen(&fen).unwrap_err(),
                FenError::BadCastling {
                    found: field.to_string()
                }
            );
        }
    }
}
