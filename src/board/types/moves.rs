//! Move types and move list.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::mutation::{BoardMutation, MutationKind};
use super::piece::{Color, Piece, PlayerPiece};
use super::square::Square;

/// Most mutations a single move needs (castling).
pub const MAX_MUTATIONS: usize = 4;

/// Outcome attached to a move once it has been rated in its position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveStatus {
    #[default]
    Normal,
    Check,
    CheckMate,
    StaleMate,
    DrawByRepetition,
}

impl MoveStatus {
    /// Game over after this move.
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            MoveStatus::CheckMate | MoveStatus::StaleMate | MoveStatus::DrawByRepetition
        )
    }
}

/// An ordered, fixed list of board mutations.
///
/// Shapes produced by the generators:
/// - quiet move: remove from, add to
/// - capture: remove victim, remove from, add to
/// - castling: king relocation followed by rook relocation
///
/// Equality and hashing look at the mutations only; the cached status is
/// derived data.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    mutations: [BoardMutation; MAX_MUTATIONS],
    len: u8,
    status: MoveStatus,
}

impl Move {
    /// The move that leads to the setup position: no mutations.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Move {
            mutations: [BoardMutation::FILLER; MAX_MUTATIONS],
            len: 0,
            status: MoveStatus::Normal,
        }
    }

    /// Build a move from an explicit mutation list (at most four entries).
    #[must_use]
    pub fn from_mutations(list: &[BoardMutation]) -> Option<Self> {
        if list.len() > MAX_MUTATIONS {
            return None;
        }
        let mut mv = Move::empty();
        mv.mutations[..list.len()].copy_from_slice(list);
        mv.len = list.len() as u8;
        Some(mv)
    }

    /// Relocate `piece` from `from` to the empty square `to`.
    #[inline]
    #[must_use]
    pub const fn quiet(piece: PlayerPiece, from: Square, to: Square) -> Self {
        let mut mv = Move::empty();
        mv.mutations[0] = BoardMutation::remove(piece, from);
        mv.mutations[1] = BoardMutation::add(piece, to);
        mv.len = 2;
        mv
    }

    /// Relocate `piece` to `to`, removing `victim` from `victim_square` first.
    ///
    /// For en passant `victim_square` differs from `to`.
    #[inline]
    #[must_use]
    pub const fn capture(
        piece: PlayerPiece,
        from: Square,
        to: Square,
        victim: PlayerPiece,
        victim_square: Square,
    ) -> Self {
        let mut mv = Move::empty();
        mv.mutations[0] = BoardMutation::remove(victim, victim_square);
        mv.mutations[1] = BoardMutation::remove(piece, from);
        mv.mutations[2] = BoardMutation::add(piece, to);
        mv.len = 3;
        mv
    }

    /// King relocation followed by rook relocation.
    #[inline]
    #[must_use]
    pub const fn castle(
        color: Color,
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    ) -> Self {
        let king = PlayerPiece::new(color, Piece::King);
        let rook = PlayerPiece::new(color, Piece::Rook);
        let mut mv = Move::empty();
        mv.mutations[0] = BoardMutation::remove(king, king_from);
        mv.mutations[1] = BoardMutation::add(king, king_to);
        mv.mutations[2] = BoardMutation::remove(rook, rook_from);
        mv.mutations[3] = BoardMutation::add(rook, rook_to);
        mv.len = 4;
        mv
    }

    /// The same move with its final placement replaced by `piece`.
    #[must_use]
    pub fn promoted_to(mut self, piece: Piece) -> Self {
        if let Some(last) = self.mutations[..self.len as usize]
            .iter_mut()
            .rev()
            .find(|m| m.is_add())
        {
            last.piece.piece = piece;
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn mutations(&self) -> &[BoardMutation] {
        &self.mutations[..self.len as usize]
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> MoveStatus {
        self.status
    }

    #[inline]
    pub(crate) fn set_status(&mut self, status: MoveStatus) {
        self.status = status;
    }

    /// The player making the move (owner of the placed pieces).
    #[must_use]
    pub fn mover(&self) -> Option<Color> {
        self.mutations()
            .iter()
            .rev()
            .find(|m| m.is_add())
            .map(|m| m.piece.color)
    }

    fn lifted(&self) -> Option<BoardMutation> {
        let mover = self.mover()?;
        self.mutations()
            .iter()
            .find(|m| m.kind == MutationKind::Remove && m.piece.color == mover)
            .copied()
    }

    /// The piece that moves (the king when castling, the pawn when promoting).
    #[must_use]
    pub fn moved_piece(&self) -> Option<PlayerPiece> {
        self.lifted().map(|m| m.piece)
    }

    #[must_use]
    pub fn from(&self) -> Option<Square> {
        self.lifted().map(|m| m.square)
    }

    #[must_use]
    pub fn to(&self) -> Option<Square> {
        self.mutations()
            .iter()
            .find(|m| m.is_add())
            .map(|m| m.square)
    }

    /// The captured piece and the square it stood on.
    #[must_use]
    pub fn captured(&self) -> Option<(PlayerPiece, Square)> {
        let mover = self.mover()?;
        self.mutations()
            .iter()
            .find(|m| m.kind == MutationKind::Remove && m.piece.color != mover)
            .map(|m| (m.piece, m.square))
    }

    /// One more removal than placement.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        let adds = self.mutations().iter().filter(|m| m.is_add()).count();
        self.len as usize == 2 * adds + 1
    }

    #[inline]
    #[must_use]
    pub const fn is_castling(&self) -> bool {
        self.len == 4
    }

    #[must_use]
    pub fn promotion(&self) -> Option<Piece> {
        let moved = self.moved_piece()?;
        if moved.piece != Piece::Pawn {
            return None;
        }
        self.mutations()
            .iter()
            .rev()
            .find(|m| m.is_add())
            .map(|m| m.piece.piece)
            .filter(|&p| p != Piece::Pawn)
    }

    #[must_use]
    pub fn is_double_pawn_push(&self) -> bool {
        match (self.moved_piece(), self.from(), self.to()) {
            (Some(p), Some(from), Some(to)) => {
                p.piece == Piece::Pawn && from.file() == to.file() && from.rank().abs_diff(to.rank()) == 2
            }
            _ => false,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.mutations() == other.mutations()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mutations().hash(state);
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::empty()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move(")?;
        for (i, m) in self.mutations().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, " {:?})", self.status)
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 128;
pub(crate) const EMPTY_MOVE: Move = Move::empty();

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        if self.len < MAX_MOVES {
            self.moves[self.len] = mv;
            self.len += 1;
        }
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&Move) -> bool) {
        let mut write = 0;
        for read in 0..self.len {
            if keep(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.iter().any(|m| m == mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
