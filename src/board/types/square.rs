//! Square type and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the chess board, stored as `file * 8 + rank`.
///
/// Only indices in `0..64` can be constructed, so every `Square` in the
/// program is on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a square from file (0 = a) and rank (0 = rank 1).
    #[inline]
    #[must_use]
    pub const fn new(file: usize, rank: usize) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square((file * 8 + rank) as u8))
        } else {
            None
        }
    }

    /// Create a square from its index (0-63, a1=0, a2=1, ..., h8=63).
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < 64 {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    /// Build a square from coordinates known to be in range.
    #[inline]
    pub(crate) const fn at(file: usize, rank: usize) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square((file * 8 + rank) as u8)
    }

    /// Iterate all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 % 8) as usize
    }

    /// The square reached by stepping `(df, dr)`, if it stays on the board.
    #[inline]
    #[must_use]
    pub const fn offset(self, df: isize, dr: isize) -> Option<Self> {
        let file = self.file() as isize + df;
        let rank = self.rank() as isize + dr;
        if file < 0 || file >= 8 || rank < 0 || rank >= 8 {
            None
        } else {
            Some(Square((file * 8 + rank) as u8))
        }
    }

    /// Chebyshev (king-move) distance between two squares.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Square) -> usize {
        self.file()
            .abs_diff(other.file())
            .max(self.rank().abs_diff(other.rank()))
    }

    /// Manhattan distance between two squares.
    #[inline]
    #[must_use]
    pub fn manhattan(self, other: Square) -> usize {
        self.file().abs_diff(other.file()) + self.rank().abs_diff(other.rank())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((file, rank): (usize, usize)) -> Result<Self, Self::Error> {
        Square::new(file, rank).ok_or(SquareError::OutOfRange { file, rank })
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let invalid = || SquareError::Malformed {
            text: s.to_string(),
        };
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0] {
            b'a'..=b'h' => (bytes[0] - b'a') as usize,
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b'1'..=b'8' => (bytes[1] - b'1') as usize,
            _ => return Err(invalid()),
        };
        Ok(Square::at(file, rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout_is_file_major() {
        let b1: Square = "b1".parse().unwrap();
        assert_eq!(b1.index(), 8);
        assert_eq!(b1.file(), 1);
        assert_eq!(b1.rank(), 0);
        assert_eq!(Square::from_index(63).unwrap().to_string(), "h8");
    }

    #[test]
    fn test_out_of_range_not_constructible() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::from_index(64).is_none());
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert_eq!(
            Square::try_from((3, 9)),
            Err(SquareError::OutOfRange { file: 3, rank: 9 })
        );
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 2).map(|s| s.to_string()), Some("b3".to_string()));
    }

    #[test]
    fn test_distances() {
        let e4: Square = "e4".parse().unwrap();
        let h8: Square = "h8".parse().unwrap();
        assert_eq!(e4.distance(h8), 4);
        assert_eq!(e4.manhattan(h8), 7);
    }
}
