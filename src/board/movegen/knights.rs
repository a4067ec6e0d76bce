use once_cell::sync::Lazy;

use super::super::{Board, MoveList, PlayerPiece, Square};

const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Knight destinations per square.
pub(crate) static KNIGHT_TARGETS: Lazy<Vec<Vec<Square>>> = Lazy::new(|| {
    Square::all()
        .map(|sq| {
            KNIGHT_OFFSETS
                .iter()
                .filter_map(|&(df, dr)| sq.offset(df, dr))
                .collect()
        })
        .collect()
});

pub(super) fn knight_attacks(from: Square, target: Square) -> bool {
    let df = from.file().abs_diff(target.file());
    let dr = from.rank().abs_diff(target.rank());
    (df == 1 && dr == 2) || (df == 2 && dr == 1)
}

impl Board {
    pub(crate) fn generate_knight_moves(&self, from: Square, piece: PlayerPiece, moves: &mut MoveList) {
        for &to in &KNIGHT_TARGETS[from.index()] {
            self.push_step(piece, from, to, moves);
        }
    }
}
