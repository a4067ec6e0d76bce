use super::super::{Move, MAX_PLY};
use super::constants::KILLERS_PER_PLY;

#[derive(Clone, Copy, Debug)]
struct Killer {
    mv: Move,
    uses: u32,
}

/// Quiet refutations remembered per ply, with how often each caused a cutoff.
pub struct KillerTable {
    slots: Vec<[Option<Killer>; KILLERS_PER_PLY]>,
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: vec![[None; KILLERS_PER_PLY]; MAX_PLY],
        }
    }

    /// Remember that `mv` caused a cutoff at `ply`.
    ///
    /// A known killer gets its count bumped; a new one replaces the
    /// less-used slot.
    pub fn record(&mut self, ply: usize, mv: Move) {
        let Some(row) = self.slots.get_mut(ply) else {
            return;
        };
        if let Some(known) = row.iter_mut().flatten().find(|k| k.mv == mv) {
            known.uses += 1;
            return;
        }
        let victim = row
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.map_or(0, |k| k.uses))
            .map_or(0, |(idx, _)| idx);
        row[victim] = Some(Killer { mv, uses: 1 });
    }

    /// Killers at `ply`, most-used first.
    #[must_use]
    pub fn killers(&self, ply: usize) -> Vec<Move> {
        let Some(row) = self.slots.get(ply) else {
            return Vec::new();
        };
        let mut found: Vec<Killer> = row.iter().flatten().copied().collect();
        found.sort_by(|a, b| b.uses.cmp(&a.uses));
        found.into_iter().map(|k| k.mv).collect()
    }

    /// Move the killers present in `moves` to the front, most-used first.
    /// The rest keep their relative order.
    pub fn promote(&self, ply: usize, moves: &mut [Move]) {
        for killer in self.killers(ply).iter().rev() {
            if let Some(pos) = moves.iter().position(|m| m == killer) {
                moves[..=pos].rotate_right(1);
            }
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.slots {
            *row = [None; KILLERS_PER_PLY];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece, PlayerPiece, Square};

    fn knight_move(from: &str, to: &str) -> Move {
        let knight = PlayerPiece::new(Color::White, Piece::Knight);
        Move::quiet(knight, from.parse::<Square>().unwrap(), to.parse::<Square>().unwrap())
    }

    #[test]
    fn test_record_bumps_and_replaces_less_used() {
        let mut table = KillerTable::new();
        let a = knight_move("b1", "c3");
        let b = knight_move("g1", "f3");
        let c = knight_move("b1", "a3");
        table.record(3, a);
        table.record(3, a);
        table.record(3, b);
        table.record(3, c);
        assert_eq!(table.killers(3), vec![a, c]);
    }

    #[test]
    fn test_promote_moves_killers_to_front() {
        let mut table = KillerTable::new();
        let a = knight_move("b1", "c3");
        let b = knight_move("g1", "f3");
        let c = knight_move("b1", "a3");
        table.record(1, c);
        table.record(1, b);
        table.record(1, b);
        let mut moves = [a, c, b];
        table.promote(1, &mut moves);
        assert_eq!(moves, [b, c, a]);
    }

    #[test]
    fn test_out_of_range_ply_is_ignored() {
        let mut table = KillerTable::new();
        table.record(MAX_PLY + 5, knight_move("b1", "c3"));
        assert!(table.killers(MAX_PLY + 5).is_empty());
    }
}
