//! Error types for board operations.

use std::fmt;

use super::types::{BoardMutation, Color, Move, PlayerPiece};

/// Errors raised while mutating or querying a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A mutation did not match the board: adding onto an occupied square or
    /// removing a piece that is not there. The move list is corrupted.
    InvalidState {
        mutation: BoardMutation,
        found: Option<PlayerPiece>,
    },
    /// The requested move is not among the legal moves of the position.
    MoveNotFound { mv: Move },
    /// A node id that does not belong to the move tree.
    UnknownNode { id: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidState { mutation, found } => match found {
                Some(piece) => write!(
                    f,
                    "Invalid board state applying {mutation}: found {piece} on {}",
                    mutation.square
                ),
                None => write!(
                    f,
                    "Invalid board state applying {mutation}: {} is empty",
                    mutation.square
                ),
            },
            BoardError::MoveNotFound { mv } => {
                write!(f, "Move {mv:?} not found among legal moves")
            }
            BoardError::UnknownNode { id } => write!(f, "Unknown move tree node {id}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Reasons a FEN string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Nothing but whitespace.
    MissingPlacement,
    /// The placement does not have exactly eight ranks.
    RankCount { found: usize },
    /// A character that is neither a piece letter nor a digit.
    UnknownPiece { ch: char },
    /// A rank does not describe exactly eight squares (`row` counts from
    /// rank 8).
    RankWidth { row: usize, squares: usize },
    /// A `0` digit inside a rank.
    ZeroSkip { row: usize },
    /// Side to move other than `w` or `b`.
    BadSideToMove { found: String },
    /// Castling field other than `-` or distinct letters from `KQkq`.
    BadCastling { found: String },
    /// Full-move number is not a positive integer.
    BadMoveNumber { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::MissingPlacement => write!(f, "FEN has no piece placement"),
            FenError::RankCount { found } => {
                write!(f, "FEN placement has {found} ranks, expected 8")
            }
            FenError::UnknownPiece { ch } => write!(f, "Unknown piece letter '{ch}' in FEN"),
            FenError::RankWidth { row, squares } => {
                write!(f, "Rank {} of the FEN describes {squares} squares, expected 8", 8 - row)
            }
            FenError::ZeroSkip { row } => write!(f, "Rank {} of the FEN skips zero squares", 8 - row),
            FenError::BadSideToMove { found } => {
                write!(f, "Side to move '{found}' is neither 'w' nor 'b'")
            }
            FenError::BadCastling { found } => {
                write!(f, "Castling field '{found}' is not '-' or a subset of 'KQkq'")
            }
            FenError::BadMoveNumber { found } => {
                write!(f, "Full-move number '{found}' is not a positive integer")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Reasons a square could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// File or rank outside 0..8.
    OutOfRange { file: usize, rank: usize },
    /// Text that is not a file letter followed by a rank digit.
    Malformed { text: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::OutOfRange { file, rank } => {
                write!(f, "No square at file {file}, rank {rank}")
            }
            SquareError::Malformed { text } => write!(f, "'{text}' is not a square name"),
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for move notation parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Empty notation string
    Empty,
    /// Notation does not have the `[piece]from-to` shape
    Malformed { notation: String },
    /// Invalid square in notation
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// No legal move matches the notation
    NoMatchingMove { notation: String },
    /// The empty move has no notation
    NullMove,
    /// The matched move could not be played
    Board(BoardError),
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "Empty move notation"),
            NotationError::Malformed { notation } => {
                write!(f, "Malformed move notation '{notation}'")
            }
            NotationError::InvalidSquare { notation } => {
                write!(f, "Invalid square in '{notation}'")
            }
            NotationError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            NotationError::NoMatchingMove { notation } => {
                write!(f, "No legal move matches '{notation}'")
            }
            NotationError::NullMove => write!(f, "The empty move has no notation"),
            NotationError::Board(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for NotationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotationError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for NotationError {
    fn from(err: BoardError) -> Self {
        NotationError::Board(err)
    }
}

/// Reasons a search produced no move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The progress monitor asked the search to stop.
    Cancelled,
    /// The side to move has no legal move (mate or stalemate).
    NoLegalMoves,
    /// A move was requested for the player who is not to move.
    NotToMove { player: Color },
    /// The board rejected a move while searching.
    Board(BoardError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Cancelled => write!(f, "Search cancelled"),
            SearchError::NoLegalMoves => write!(f, "No legal moves in this position"),
            SearchError::NotToMove { player } => write!(f, "{player} is not to move"),
            SearchError::Board(err) => write!(f, "Board error during search: {err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for SearchError {
    fn from(err: BoardError) -> Self {
        SearchError::Board(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece, Square};

    #[test]
    fn test_invalid_state_mentions_square() {
        let sq: Square = "e4".parse().unwrap();
        let err = BoardError::InvalidState {
            mutation: BoardMutation::add(PlayerPiece::new(Color::White, Piece::Knight), sq),
            found: Some(PlayerPiece::new(Color::Black, Piece::Pawn)),
        };
        let text = err.to_string();
        assert!(text.contains("e4"));
        assert!(text.contains('p'));
    }

    #[test]
    fn test_move_not_found_message() {
        let err = BoardError::MoveNotFound { mv: Move::empty() };
        assert!(err.to_string().contains("not found among legal moves"));
    }

    #[test]
    fn test_fen_rank_width_names_rank() {
        let err = FenError::RankWidth { row: 0, squares: 9 };
        assert_eq!(err.to_string(), "Rank 8 of the FEN describes 9 squares, expected 8");
        let short = FenError::RankWidth { row: 7, squares: 7 };
        assert!(short.to_string().starts_with("Rank 1 "));
    }

    #[test]
    fn test_square_error_quotes_text() {
        let err = SquareError::Malformed {
            text: "xyz".to_string(),
        };
        assert!(err.to_string().contains("'xyz'"));
    }

    #[test]
    fn test_notation_error_no_match() {
        let err = NotationError::NoMatchingMove {
            notation: "Qh7".to_string(),
        };
        assert!(err.to_string().contains("Qh7"));
    }

    #[test]
    fn test_notation_error_exposes_board_cause() {
        let err: NotationError = BoardError::UnknownNode { id: 3 }.into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&NotationError::Empty).is_none());
    }

    #[test]
    fn test_search_error_wraps_board_error() {
        let err: SearchError = BoardError::UnknownNode { id: 9 }.into();
        assert!(err.to_string().contains("node 9"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(
            SearchError::NotToMove { player: Color::Black }.to_string(),
            "Black is not to move"
        );
    }
}
