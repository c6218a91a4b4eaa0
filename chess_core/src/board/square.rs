use std::{
    fmt::{Debug, Display, Write},
    str::FromStr,
};

use paste::paste;
use seq_macro::seq;
use thiserror::Error;

/// A square on the chessboard, stored as an integer `0..64` ordered by
/// increasing file then rank: 0 is a1, 7 is h1, 8 is a2, 63 is h8.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const WHITE_QUEENSIDE_ROOK: Self = Self::new_unchecked(0, 0);
    pub const WHITE_KINGSIDE_ROOK: Self = Self::new_unchecked(0, 7);
    pub const BLACK_QUEENSIDE_ROOK: Self = Self::new_unchecked(7, 0);
    pub const BLACK_KINGSIDE_ROOK: Self = Self::new_unchecked(7, 7);

    /// Builds a square from `rank`/`file` in `0..=7`. Returns `None` if
    /// either is out of range.
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank >= 8 || file >= 8 {
            None
        } else {
            Some(Self(8 * rank + file))
        }
    }

    /// Builds a square from `rank`/`file`, truncating out-of-range inputs
    /// into `0..64` rather than rejecting them.
    pub const fn new_unchecked(rank: u8, file: u8) -> Self {
        Self(rank.wrapping_mul(8).wrapping_add(file) % 64)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn from_index_unchecked(index: usize) -> Self {
        Self((index % 64) as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank `0..=7`, 0 is rank 1.
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// File `0..=7`, 0 is file a.
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Offsets this square, truncating the result back into `0..64`.
    pub const fn offset(self, offset: i8) -> Self {
        Self::from_index_unchecked((self.0 as i8).wrapping_add(offset) as u8 as usize)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char((self.file() + b'a') as char)?;
        f.write_char((self.rank() + b'1') as char)
    }
}

impl Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("invalid square")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(ParseSquareError)?;
        let rank = chars.next().ok_or(ParseSquareError)?;
        if chars.next().is_some() {
            return Err(ParseSquareError);
        }

        let file = (file as i32) - ('a' as i32);
        let rank = (rank as i32) - ('1' as i32);
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Ok(Square::new_unchecked(rank as u8, file as u8))
        } else {
            Err(ParseSquareError)
        }
    }
}

/// Named square constants, e.g. `Square::E4`.
#[allow(clippy::eq_op, clippy::char_lit_as_u8)]
impl Square {
    seq!(RANK in 1..=8 {
        seq!(FILE in 'A'..='H' {
            paste! {
                pub const [<FILE RANK>]: Square = Square::new_unchecked(RANK - 1, FILE as u8 - b'A');
            }
        });
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_and_unchecked() {
        assert_eq!(Square::new(5, 7), Some(Square(47)));
        assert_eq!(Square::new(3, 9), None);
        assert_eq!(Square::new_unchecked(5, 7), Square(47));
    }

    #[test]
    fn rank_and_file() {
        for rank in 0..8 {
            for file in 0..8 {
                let square = Square::new(rank, file).unwrap();
                assert_eq!(square.rank(), rank);
                assert_eq!(square.file(), file);
            }
        }
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(format!("{}", Square::E4), "e4");
        assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
        assert_eq!("".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("i9".parse::<Square>(), Err(ParseSquareError));
        assert_eq!("a1 ".parse::<Square>(), Err(ParseSquareError));
    }

    #[test]
    fn named_aliases() {
        assert_eq!(Square::new_unchecked(0, 4), Square::E1);
        assert_eq!(Square::new_unchecked(7, 4), Square::E8);
        assert_eq!(Square::new_unchecked(0, 0), Square::A1);
        assert_eq!(Square::new_unchecked(0, 7), Square::H1);
    }

    #[test]
    fn offset_wraps_into_range() {
        assert_eq!(Square::E4.offset(8), Square::E5);
        assert_eq!(Square::A1.offset(-8), Square::A8);
    }
}
