use std::{fmt, fmt::Write as _, ops};

use crate::{
    color::Color,
    square::{File, Rank, Square},
};

/// A set of squares, represented by a 64 bit integer mask.
///
/// # Examples
///
/// ```
/// use shatranj::{Bitboard, Rank};
///
/// let mask = Bitboard::from_rank(Rank::Third);
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // 1 1 1 1 1 1 1 1
/// // . . . . . . . .
/// // . . . . . . . .
/// assert_eq!(mask.count(), 8);
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    /// An empty set.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// All squares.
    pub const FULL: Bitboard = Bitboard(!0);

    /// The four corner squares.
    pub const CORNERS: Bitboard = Bitboard(0x8100_0000_0000_0081);

    /// The dark squares.
    pub const DARK_SQUARES: Bitboard = Bitboard(0xaa55_aa55_aa55_aa55);

    /// The light squares.
    pub const LIGHT_SQUARES: Bitboard = Bitboard(0x55aa_55aa_55aa_55aa);

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1 << sq.index())
    }

    #[inline]
    pub const fn from_file(file: File) -> Bitboard {
        Bitboard(0x0101_0101_0101_0101 << file as u32)
    }

    #[inline]
    pub const fn from_rank(rank: Rank) -> Bitboard {
        Bitboard(0xff << (8 * rank as u32))
    }

    /// The given rank as seen from the point of view of `color`, so that
    /// rank 0 is the back rank for either side.
    #[inline]
    pub const fn relative_rank(color: Color, rank: Rank) -> Bitboard {
        match color {
            Color::White => Bitboard(0xff << (8 * rank as u32)),
            Color::Black => Bitboard(0xff00_0000_0000_0000 >> (8 * rank as u32)),
        }
    }

    /// Shifts the whole set towards the opponent's side of the board.
    #[inline]
    pub const fn relative_shift(self, color: Color, shift: u32) -> Bitboard {
        match color {
            Color::White => Bitboard(self.0 << shift),
            Color::Black => Bitboard(self.0 >> shift),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1 << sq.index()) != 0
    }

    #[inline]
    pub fn add(&mut self, sq: Square) {
        self.0 |= 1 << sq.index();
    }

    #[inline]
    pub fn discard(&mut self, sq: Square) {
        self.0 &= !(1 << sq.index());
    }

    #[inline]
    pub fn toggle(&mut self, sq: Square) {
        self.0 ^= 1 << sq.index();
    }

    #[inline]
    #[must_use]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1 << sq.index()))
    }

    #[inline]
    #[must_use]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1 << sq.index()))
    }

    /// The square with the lowest index, if any.
    #[inline]
    pub const fn first(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::new_unchecked(self.0.trailing_zeros()))
        }
    }

    /// The square with the highest index, if any.
    #[inline]
    pub const fn last(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::new_unchecked(63 ^ self.0.leading_zeros()))
        }
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// The contained square if the set holds exactly one.
    #[inline]
    pub const fn single_square(self) -> Option<Square> {
        if self.more_than_one() {
            None
        } else {
            self.first()
        }
    }
}

impl From<Square> for Bitboard {
    #[inline]
    fn from(sq: Square) -> Bitboard {
        Bitboard::from_square(sq)
    }
}

impl From<File> for Bitboard {
    #[inline]
    fn from(file: File) -> Bitboard {
        Bitboard::from_file(file)
    }
}

impl From<Rank> for Bitboard {
    #[inline]
    fn from(rank: Rank) -> Bitboard {
        Bitboard::from_rank(rank)
    }
}

macro_rules! bitboard_ops {
    ($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl ops::$trait for Bitboard {
            type Output = Bitboard;

            #[inline]
            fn $fn(self, rhs: Bitboard) -> Bitboard {
                Bitboard(self.0 $op rhs.0)
            }
        }

        impl ops::$assign_trait for Bitboard {
            #[inline]
            fn $assign_fn(&mut self, rhs: Bitboard) {
                self.0 = self.0 $op rhs.0;
            }
        }
    };
}

bitboard_ops! { BitAnd, bitand, BitAndAssign, bitand_assign, & }
bitboard_ops! { BitOr, bitor, BitOrAssign, bitor_assign, | }
bitboard_ops! { BitXor, bitxor, BitXorAssign, bitxor_assign, ^ }

impl ops::Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let square = self.first();
        self.0 &= self.0.wrapping_sub(1);
        square
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.count() as usize;
        (len, Some(len))
    }

    fn count(self) -> usize {
        Bitboard::count(self) as usize
    }

    fn last(self) -> Option<Square> {
        Bitboard::last(self)
    }
}

impl DoubleEndedIterator for Bitboard {
    #[inline]
    fn next_back(&mut self) -> Option<Square> {
        let square = Bitboard::last(*self);
        if let Some(sq) = square {
            self.toggle(sq);
        }
        square
    }
}

impl ExactSizeIterator for Bitboard {}

impl std::iter::FusedIterator for Bitboard {}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Bitboard {
        let mut result = Bitboard::EMPTY;
        for sq in iter {
            result.add(sq);
        }
        result
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                f.write_char(if self.contains(sq) { '1' } else { '.' })?;
                f.write_char(if file == File::H { '\n' } else { ' ' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_last() {
        assert_eq!(Bitboard::from_square(Square::D2).first(), Some(Square::D2));
        assert_eq!(Bitboard::EMPTY.first(), None);
        let ab = Bitboard::from_square(Square::A1).with(Square::H1);
        assert_eq!(ab.last(), Some(Square::H1));
        assert_eq!(Bitboard::EMPTY.last(), None);
    }

    #[test]
    fn test_more_than_one() {
        assert!(!Bitboard::EMPTY.more_than_one());
        assert!(!Bitboard::from_square(Square::C6).more_than_one());
        assert!(Bitboard::CORNERS.more_than_one());
    }

    #[test]
    fn test_rank_file() {
        assert_eq!(Bitboard::from_rank(Rank::Fourth), Bitboard(0xff00_0000));
        assert_eq!(
            Bitboard::from_file(File::A),
            Bitboard(0x0101_0101_0101_0101)
        );
    }

    #[test]
    fn test_iterator() {
        let squares: Vec<_> = Bitboard::CORNERS.collect();
        assert_eq!(
            squares,
            vec![Square::A1, Square::H1, Square::A8, Square::H8]
        );
        let reversed: Vec<_> = Bitboard::CORNERS.rev().collect();
        assert_eq!(
            reversed,
            vec![Square::H8, Square::A8, Square::H1, Square::A1]
        );
    }

    #[test]
    fn test_relative_rank() {
        assert_eq!(
            Bitboard::relative_rank(Color::White, Rank::First),
            Bitboard::from_rank(Rank::First)
        );
        assert_eq!(
            Bitboard::relative_rank(Color::Black, Rank::First),
            Bitboard::from_rank(Rank::Eighth)
        );
    }
}
