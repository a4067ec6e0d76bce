//! Atomic board mutations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece, PlayerPiece};
use super::square::Square;

/// Whether a mutation places or lifts a piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MutationKind {
    Add,
    Remove,
}

impl MutationKind {
    #[inline]
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            MutationKind::Add => MutationKind::Remove,
            MutationKind::Remove => MutationKind::Add,
        }
    }
}

/// "Add piece P at square S" or "remove piece P from square S".
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardMutation {
    pub piece: PlayerPiece,
    pub square: Square,
    pub kind: MutationKind,
}

impl BoardMutation {
    /// Filler for unused inline slots; never observable through `Move`.
    pub(crate) const FILLER: BoardMutation = BoardMutation {
        piece: PlayerPiece::new(Color::White, Piece::Pawn),
        square: Square::at(0, 0),
        kind: MutationKind::Add,
    };

    #[inline]
    #[must_use]
    pub const fn add(piece: PlayerPiece, square: Square) -> Self {
        BoardMutation {
            piece,
            square,
            kind: MutationKind::Add,
        }
    }

    #[inline]
    #[must_use]
    pub const fn remove(piece: PlayerPiece, square: Square) -> Self {
        BoardMutation {
            piece,
            square,
            kind: MutationKind::Remove,
        }
    }

    /// The mutation that undoes this one.
    #[inline]
    #[must_use]
    pub const fn inverse(self) -> Self {
        BoardMutation {
            piece: self.piece,
            square: self.square,
            kind: self.kind.inverse(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_add(self) -> bool {
        matches!(self.kind, MutationKind::Add)
    }
}

impl fmt::Display for BoardMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            MutationKind::Add => '+',
            MutationKind::Remove => '-',
        };
        write!(f, "{verb}{}{}", self.piece, self.square)
    }
}
