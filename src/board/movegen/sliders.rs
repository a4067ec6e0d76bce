use super::super::{Board, MoveList, PlayerPiece, Square};

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Board {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        piece: PlayerPiece,
        directions: &[(isize, isize)],
        moves: &mut MoveList,
    ) {
        for &(df, dr) in directions {
            let mut cursor = from.offset(df, dr);
            while let Some(to) = cursor {
                if !self.push_step(piece, from, to, moves) {
                    break;
                }
                cursor = to.offset(df, dr);
            }
        }
    }
}

/// Line attack from `from` to `target` along rook and/or bishop lines,
/// blocked by any square `is_empty` rejects.
pub(super) fn slider_attacks(
    from: Square,
    target: Square,
    straight: bool,
    diagonal: bool,
    is_empty: impl Fn(Square) -> bool,
) -> bool {
    let df = target.file() as isize - from.file() as isize;
    let dr = target.rank() as isize - from.rank() as isize;
    let aligned = if df == 0 || dr == 0 {
        straight
    } else if df.abs() == dr.abs() {
        diagonal
    } else {
        false
    };
    if !aligned {
        return false;
    }
    let step = (df.signum(), dr.signum());
    let mut cursor = from.offset(step.0, step.1);
    while let Some(sq) = cursor {
        if sq == target {
            return true;
        }
        if !is_empty(sq) {
            return false;
        }
        cursor = sq.offset(step.0, step.1);
    }
    false
}
