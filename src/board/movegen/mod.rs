//! Pseudo-legal move generation and attack queries.
//!
//! One generator per piece kind, selected with a `match` on [`Piece`].
//! Every generator appends to a caller-provided [`MoveList`].

mod kings;
mod knights;
mod pawns;
mod sliders;

pub(crate) use sliders::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

use super::{Board, Color, Move, MoveList, Piece, PlayerPiece, Square};

impl Board {
    /// All pseudo-legal moves for the side to move.
    #[must_use]
    pub fn pseudo_moves(&self) -> MoveList {
        self.pseudo_moves_for(self.to_move())
    }

    pub(crate) fn pseudo_moves_for(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for &from in self.pieces(color) {
            if let Some(piece) = self.piece_at(from) {
                self.generate_piece_moves(from, piece, &mut moves);
            }
        }
        moves
    }

    pub(crate) fn generate_piece_moves(&self, from: Square, piece: PlayerPiece, moves: &mut MoveList) {
        match piece.piece {
            Piece::Pawn => self.generate_pawn_moves(from, piece.color, moves),
            Piece::Knight => self.generate_knight_moves(from, piece, moves),
            Piece::Bishop => self.generate_slider_moves(from, piece, &BISHOP_DIRECTIONS, moves),
            Piece::Rook => self.generate_slider_moves(from, piece, &ROOK_DIRECTIONS, moves),
            Piece::Queen => self.generate_slider_moves(from, piece, &QUEEN_DIRECTIONS, moves),
            Piece::King => self.generate_king_moves(from, piece.color, moves),
        }
    }

    /// Push the move of `piece` onto `to` if the square is empty or holds an
    /// enemy piece. Returns whether `to` was empty (a slider may continue).
    fn push_step(&self, piece: PlayerPiece, from: Square, to: Square, moves: &mut MoveList) -> bool {
        match self.piece_at(to) {
            None => {
                moves.push(Move::quiet(piece, from, to));
                true
            }
            Some(victim) if victim.color != piece.color => {
                moves.push(Move::capture(piece, from, to, victim, to));
                false
            }
            Some(_) => false,
        }
    }

    /// Whether `piece` standing on `from` attacks `target`.
    #[must_use]
    pub fn piece_attacks(&self, piece: PlayerPiece, from: Square, target: Square) -> bool {
        attacks_through(piece, from, target, |sq| self.is_empty(sq))
    }

    /// Whether any piece of `color` attacks `target`. Stops at the first hit.
    #[must_use]
    pub fn any_piece_attacks(&self, color: Color, target: Square) -> bool {
        self.pieces(color).iter().any(|&from| {
            self.piece_at(from)
                .is_some_and(|piece| self.piece_attacks(piece, from, target))
        })
    }

    /// Whether `mv` leaves its mover's king unattacked. The move is played
    /// on a scratch copy of the occupancy; the board itself is not touched.
    pub(crate) fn keeps_king_safe(&self, mv: &Move) -> bool {
        let Some(mover) = mv.mover() else {
            return true;
        };
        let mut squares = self.squares;
        for m in mv.mutations() {
            squares[m.square.index()] = if m.is_add() { Some(m.piece) } else { None };
        }
        let king = PlayerPiece::new(mover, Piece::King);
        let landed = mv
            .mutations()
            .iter()
            .find(|m| m.is_add() && m.piece == king)
            .map(|m| m.square);
        let Some(target) = landed.or_else(|| self.king_square(mover)) else {
            return true;
        };
        let is_empty = |sq: Square| squares[sq.index()].is_none();
        !self.pieces(mover.opponent()).iter().any(|&from| {
            squares[from.index()]
                .is_some_and(|p| p.color != mover && attacks_through(p, from, target, is_empty))
        })
    }

    /// Number of legal moves each side would have in the current position.
    pub(crate) fn mobility_counts(&self) -> (i32, i32) {
        let [white, black] = Color::BOTH.map(|color| {
            let moves = self.pseudo_moves_for(color);
            moves.iter().filter(|mv| self.keeps_king_safe(mv)).count() as i32
        });
        (white, black)
    }
}

/// Attack test for `piece` on `from` against `target`, with line blockers
/// read through `is_empty`.
fn attacks_through(piece: PlayerPiece, from: Square, target: Square, is_empty: impl Fn(Square) -> bool) -> bool {
    if from == target {
        return false;
    }
    match piece.piece {
        Piece::Pawn => pawns::pawn_attacks(piece.color, from, target),
        Piece::Knight => knights::knight_attacks(from, target),
        Piece::King => kings::king_attacks(from, target),
        Piece::Bishop => sliders::slider_attacks(from, target, false, true, is_empty),
        Piece::Rook => sliders::slider_attacks(from, target, true, false, is_empty),
        Piece::Queen => sliders::slider_attacks(from, target, true, true, is_empty),
    }
}
