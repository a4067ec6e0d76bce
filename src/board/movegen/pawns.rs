use super::super::{Board, Color, Move, MoveList, Piece, PlayerPiece, Square, PROMOTION_PIECES};

pub(super) fn pawn_attacks(color: Color, from: Square, target: Square) -> bool {
    let forward = from.rank() as isize + color.pawn_direction();
    target.rank() as isize == forward && from.file().abs_diff(target.file()) == 1
}

/// Push `mv`, expanded into one move per promotion piece when it lands on
/// the far rank.
fn push_pawn_move(mv: Move, to: Square, color: Color, moves: &mut MoveList) {
    if to.rank() == color.pawn_promotion_rank() {
        for piece in PROMOTION_PIECES {
            moves.push(mv.promoted_to(piece));
        }
    } else {
        moves.push(mv);
    }
}

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let pawn = PlayerPiece::new(color, Piece::Pawn);
        let dir = color.pawn_direction();

        if let Some(one) = from.offset(0, dir).filter(|&sq| self.is_empty(sq)) {
            push_pawn_move(Move::quiet(pawn, from, one), one, color, moves);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir).filter(|&sq| self.is_empty(sq)) {
                    moves.push(Move::quiet(pawn, from, two));
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(df, dir) else {
                continue;
            };
            if let Some(victim) = self.piece_at(to).filter(|p| p.color != color) {
                push_pawn_move(Move::capture(pawn, from, to, victim, to), to, color, moves);
            }
        }

        self.generate_en_passant(from, pawn, moves);
    }

    /// En passant is only available right after the enemy pawn's double
    /// advance, and only to a pawn standing beside its landing square.
    fn generate_en_passant(&self, from: Square, pawn: PlayerPiece, moves: &mut MoveList) {
        let last = self.current_move();
        if !last.is_double_pawn_push() || last.mover() != Some(pawn.color.opponent()) {
            return;
        }
        let Some(landed) = last.to() else {
            return;
        };
        if landed.rank() != from.rank() || landed.file().abs_diff(from.file()) != 1 {
            return;
        }
        let victim = PlayerPiece::new(pawn.color.opponent(), Piece::Pawn);
        if let Some(to) = landed.offset(0, pawn.color.pawn_direction()) {
            if self.is_empty(to) {
                moves.push(Move::capture(pawn, from, to, victim, landed));
            }
        }
    }
}
