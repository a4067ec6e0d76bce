use once_cell::sync::Lazy;

use super::super::{Board, Color, Move, MoveList, Piece, PlayerPiece, Square};

/// King destinations per square.
pub(crate) static KING_TARGETS: Lazy<Vec<Vec<Square>>> = Lazy::new(|| {
    Square::all()
        .map(|sq| {
            super::QUEEN_DIRECTIONS
                .iter()
                .filter_map(|&(df, dr)| sq.offset(df, dr))
                .collect()
        })
        .collect()
});

/// Files involved in castling towards one wing.
struct CastleWing {
    rook_file: usize,
    king_to_file: usize,
    rook_to_file: usize,
    empty_files: &'static [usize],
    transit_files: &'static [usize],
}

const CASTLE_WINGS: [CastleWing; 2] = [
    CastleWing {
        rook_file: 7,
        king_to_file: 6,
        rook_to_file: 5,
        empty_files: &[5, 6],
        transit_files: &[5, 6],
    },
    CastleWing {
        rook_file: 0,
        king_to_file: 2,
        rook_to_file: 3,
        empty_files: &[1, 2, 3],
        transit_files: &[3, 2],
    },
];

const KING_HOME_FILE: usize = 4;

pub(super) fn king_attacks(from: Square, target: Square) -> bool {
    from.distance(target) == 1
}

impl Board {
    pub(crate) fn generate_king_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let king = PlayerPiece::new(color, Piece::King);
        for &to in &KING_TARGETS[from.index()] {
            self.push_step(king, from, to, moves);
        }
        self.generate_castling_moves(from, color, moves);
    }

    /// Castling is allowed when neither the king nor the rook has ever been
    /// lifted on the current line, the squares between them are empty and the
    /// king neither starts, crosses nor lands on an attacked square.
    fn generate_castling_moves(&self, from: Square, color: Color, moves: &mut MoveList) {
        let rank = color.back_rank();
        let home = Square::at(KING_HOME_FILE, rank);
        if from != home || self.has_moved_from(home) {
            return;
        }
        let enemy = color.opponent();
        let rook = PlayerPiece::new(color, Piece::Rook);
        let mut in_check = None;

        for wing in &CASTLE_WINGS {
            let rook_from = Square::at(wing.rook_file, rank);
            if self.piece_at(rook_from) != Some(rook) || self.has_moved_from(rook_from) {
                continue;
            }
            if !wing.empty_files.iter().all(|&f| self.is_empty(Square::at(f, rank))) {
                continue;
            }
            if *in_check.get_or_insert_with(|| self.any_piece_attacks(enemy, home)) {
                return;
            }
            if wing
                .transit_files
                .iter()
                .any(|&f| self.any_piece_attacks(enemy, Square::at(f, rank)))
            {
                continue;
            }
            moves.push(Move::castle(
                color,
                home,
                Square::at(wing.king_to_file, rank),
                rook_from,
                Square::at(wing.rook_to_file, rank),
            ));
        }
    }
}
