//! Long algebraic move notation: `Nb1-c3`, `Bc4xf7`, `O-O`, `e7-e8=Q`.
//!
//! Suffixes carry the cached status: `+` check, `++` mate, `=` stalemate
//! and ` (draw)` for a repetition draw.

use std::fmt;

use super::error::NotationError;
use super::tree::NodeId;
use super::{Board, Move, MoveStatus, Piece, Square};

const DRAW_SUFFIX: &str = " (draw)";

/// Render `mv` with its status suffix.
pub fn format_move(mv: &Move) -> Result<String, NotationError> {
    let (Some(piece), Some(from), Some(to)) = (mv.moved_piece(), mv.from(), mv.to()) else {
        return Err(NotationError::NullMove);
    };
    let mut text = String::with_capacity(12);
    if mv.is_castling() {
        text.push_str(if to.file() > from.file() { "O-O" } else { "O-O-O" });
    } else {
        if piece.piece != Piece::Pawn {
            text.push(piece.piece.to_char().to_ascii_uppercase());
        }
        text.push_str(&from.to_string());
        text.push(if mv.is_capture() { 'x' } else { '-' });
        text.push_str(&to.to_string());
        if let Some(promoted) = mv.promotion() {
            text.push('=');
            text.push(promoted.to_char().to_ascii_uppercase());
        }
    }
    text.push_str(match mv.status() {
        MoveStatus::Normal => "",
        MoveStatus::Check => "+",
        MoveStatus::CheckMate => "++",
        MoveStatus::StaleMate => "=",
        MoveStatus::DrawByRepetition => DRAW_SUFFIX,
    });
    Ok(text)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match format_move(self) {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("--"),
        }
    }
}

/// Render a line of moves separated by spaces.
#[must_use]
pub fn format_line(line: &[Move]) -> String {
    line.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// What the text asks for, before it is matched against the legal moves.
#[derive(Debug, PartialEq, Eq)]
enum Request {
    Castle { kingside: bool },
    Step {
        piece: Piece,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    },
}

fn strip_status(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_suffix(DRAW_SUFFIX).unwrap_or(text);
    let text = text.trim_end_matches('+');
    text.strip_suffix('=').unwrap_or(text)
}

fn parse_square(text: &str, notation: &str) -> Result<Square, NotationError> {
    text.parse().map_err(|_| NotationError::InvalidSquare {
        notation: notation.to_string(),
    })
}

fn parse_request(notation: &str) -> Result<Request, NotationError> {
    let text = strip_status(notation);
    if text.is_empty() {
        return Err(NotationError::Empty);
    }
    match text {
        "O-O" | "0-0" => return Ok(Request::Castle { kingside: true }),
        "O-O-O" | "0-0-0" => return Ok(Request::Castle { kingside: false }),
        _ => {}
    }
    let malformed = || NotationError::Malformed {
        notation: notation.to_string(),
    };

    let (body, promotion) = match text.split_once('=') {
        Some((body, promo)) => {
            let mut chars = promo.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(malformed());
            };
            match Piece::from_char(c.to_ascii_lowercase()) {
                Some(p) if !matches!(p, Piece::Pawn | Piece::King) => (body, Some(p)),
                _ => return Err(NotationError::InvalidPromotion { char: c }),
            }
        }
        None => (text, None),
    };

    let (piece, squares) = match body.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let piece = Piece::from_char(c.to_ascii_lowercase()).ok_or_else(malformed)?;
            (piece, &body[1..])
        }
        Some(_) => (Piece::Pawn, body),
        None => return Err(malformed()),
    };
    if !squares.is_ascii() {
        return Err(malformed());
    }
    let (from, to) = match squares.len() {
        5 if matches!(squares.as_bytes()[2], b'-' | b'x') => (&squares[..2], &squares[3..]),
        4 => squares.split_at(2),
        _ => return Err(malformed()),
    };
    Ok(Request::Step {
        piece,
        from: parse_square(from, notation)?,
        to: parse_square(to, notation)?,
        promotion,
    })
}

fn fits(mv: &Move, request: &Request) -> bool {
    match *request {
        Request::Castle { kingside } => {
            mv.is_castling()
                && match (mv.from(), mv.to()) {
                    (Some(from), Some(to)) => (to.file() > from.file()) == kingside,
                    _ => false,
                }
        }
        Request::Step {
            piece,
            from,
            to,
            promotion,
        } => {
            !mv.is_castling()
                && mv.moved_piece().map(|p| p.piece) == Some(piece)
                && mv.from() == Some(from)
                && mv.to() == Some(to)
                && mv.promotion() == promotion
        }
    }
}

/// Find the legal move written as `notation` in the current position.
pub fn parse_move(board: &mut Board, notation: &str) -> Result<Move, NotationError> {
    let request = parse_request(notation)?;
    board
        .valid_moves()?
        .iter()
        .find(|mv| fits(mv, &request))
        .copied()
        .ok_or_else(|| NotationError::NoMatchingMove {
            notation: notation.to_string(),
        })
}

impl Board {
    /// Parse and play a move written in long algebraic notation.
    pub fn play_notation(&mut self, notation: &str) -> Result<NodeId, NotationError> {
        let mv = parse_move(self, notation)?;
        Ok(self.play(&mv)?)
    }

    /// Play several moves in order.
    pub fn play_line(&mut self, line: &[&str]) -> Result<NodeId, NotationError> {
        let mut last = self.current();
        for notation in line {
            last = self.play_notation(notation)?;
        }
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, PlayerPiece};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_quiet_and_capture() {
        let knight = PlayerPiece::new(Color::White, Piece::Knight);
        assert_eq!(format_move(&Move::quiet(knight, sq("b1"), sq("c3"))).unwrap(), "Nb1-c3");
        let bishop = PlayerPiece::new(Color::White, Piece::Bishop);
        let pawn = PlayerPiece::new(Color::Black, Piece::Pawn);
        let mv = Move::capture(bishop, sq("c4"), sq("f7"), pawn, sq("f7"));
        assert_eq!(mv.to_string(), "Bc4xf7");
    }

    #[test]
    fn test_format_castle_and_promotion() {
        let long = Move::castle(Color::Black, sq("e8"), sq("c8"), sq("a8"), sq("d8"));
        assert_eq!(long.to_string(), "O-O-O");
        let pawn = PlayerPiece::new(Color::White, Piece::Pawn);
        let promo = Move::quiet(pawn, sq("e7"), sq("e8")).promoted_to(Piece::Queen);
        assert_eq!(promo.to_string(), "e7-e8=Q");
    }

    #[test]
    fn test_empty_move_has_no_notation() {
        assert_eq!(format_move(&Move::empty()), Err(NotationError::NullMove));
        assert_eq!(Move::empty().to_string(), "--");
    }

    #[test]
    fn test_parse_request_shapes() {
        assert_eq!(
            parse_request("Nb1-c3+").unwrap(),
            Request::Step {
                piece: Piece::Knight,
                from: sq("b1"),
                to: sq("c3"),
                promotion: None
            }
        );
        assert_eq!(parse_request("O-O-O").unwrap(), Request::Castle { kingside: false });
        assert!(matches!(
            parse_request("e7-e8=K"),
            Err(NotationError::InvalidPromotion { char: 'K' })
        ));
        assert_eq!(parse_request("  "), Err(NotationError::Empty));
        assert!(matches!(parse_request("Nb1"), Err(NotationError::Malformed { .. })));
    }

    #[test]
    fn test_parse_move_on_start_position() {
        let mut board = Board::new();
        let mv = parse_move(&mut board, "e2-e4").unwrap();
        assert_eq!(mv.to(), Some(sq("e4")));
        assert!(matches!(
            parse_move(&mut board, "e2-e5"),
            Err(NotationError::NoMatchingMove { .. })
        ));
    }
}
