use bitflags::bitflags;

use crate::{
    bitboard::Bitboard,
    color::Color,
    square::Square,
};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    /// Where the king ends up.
    pub const fn king_to(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => Square::G1,
            (CastlingSide::KingSide, Color::Black) => Square::G8,
            (CastlingSide::QueenSide, Color::White) => Square::C1,
            (CastlingSide::QueenSide, Color::Black) => Square::C8,
        }
    }

    /// The corner square of the castling rook.
    pub const fn rook_from(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => Square::H1,
            (CastlingSide::KingSide, Color::Black) => Square::H8,
            (CastlingSide::QueenSide, Color::White) => Square::A1,
            (CastlingSide::QueenSide, Color::Black) => Square::A8,
        }
    }

    /// Where the rook ends up.
    pub const fn rook_to(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => Square::F1,
            (CastlingSide::KingSide, Color::Black) => Square::F8,
            (CastlingSide::QueenSide, Color::White) => Square::D1,
            (CastlingSide::QueenSide, Color::Black) => Square::D8,
        }
    }

    /// Squares between king and rook that must be empty.
    pub const fn empty_path(self, color: Color) -> Bitboard {
        Bitboard(match (self, color) {
            (CastlingSide::KingSide, Color::White) => 0x60,
            (CastlingSide::KingSide, Color::Black) => 0x6000_0000_0000_0000,
            (CastlingSide::QueenSide, Color::White) => 0x0e,
            (CastlingSide::QueenSide, Color::Black) => 0x0e00_0000_0000_0000,
        })
    }

    /// Squares the king stands on or passes through, which must not be
    /// attacked. Includes the starting and the final square.
    pub const fn king_path(self, color: Color) -> Bitboard {
        Bitboard(match (self, color) {
            (CastlingSide::KingSide, Color::White) => 0x70,
            (CastlingSide::KingSide, Color::Black) => 0x7000_0000_0000_0000,
            (CastlingSide::QueenSide, Color::White) => 0x1c,
            (CastlingSide::QueenSide, Color::Black) => 0x1c00_0000_0000_0000,
        })
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

bitflags! {
    /// The castling rights of both players, as kept in the fourth FEN
    /// field.
    ///
    /// Rights are monotone: play can only remove them, never restore
    /// them, even when king or rook later return to their home squares.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
    }
}

impl CastlingRights {
    /// The flag for one side of one player.
    pub const fn flag(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    #[inline]
    pub fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(CastlingRights::flag(color, side))
    }

    /// Removes both rights of one player.
    pub fn discard_color(&mut self, color: Color) {
        self.remove(match color {
            Color::White => CastlingRights::WHITE_KING_SIDE | CastlingRights::WHITE_QUEEN_SIDE,
            Color::Black => CastlingRights::BLACK_KING_SIDE | CastlingRights::BLACK_QUEEN_SIDE,
        });
    }

    /// Removes whatever rights depend on the given square being
    /// untouched. Applied to the source and the target square of every
    /// move.
    pub fn discard_square(&mut self, sq: Square) {
        self.remove(match sq {
            Square::A1 => CastlingRights::WHITE_QUEEN_SIDE,
            Square::H1 => CastlingRights::WHITE_KING_SIDE,
            Square::E1 => CastlingRights::WHITE_KING_SIDE | CastlingRights::WHITE_QUEEN_SIDE,
            Square::A8 => CastlingRights::BLACK_QUEEN_SIDE,
            Square::H8 => CastlingRights::BLACK_KING_SIDE,
            Square::E8 => CastlingRights::BLACK_KING_SIDE | CastlingRights::BLACK_QUEEN_SIDE,
            _ => return,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_square() {
        let mut rights = CastlingRights::all();
        rights.discard_square(Square::H1);
        assert!(!rights.has(Color::White, CastlingSide::KingSide));
        assert!(rights.has(Color::White, CastlingSide::QueenSide));

        rights.discard_square(Square::E8);
        assert!(!rights.has(Color::Black, CastlingSide::KingSide));
        assert!(!rights.has(Color::Black, CastlingSide::QueenSide));

        rights.discard_square(Square::E4);
        assert!(rights.has(Color::White, CastlingSide::QueenSide));
    }

    #[test]
    fn test_paths() {
        assert_eq!(
            CastlingSide::KingSide.empty_path(Color::White),
            Bitboard::from_square(Square::F1).with(Square::G1)
        );
        assert_eq!(
            CastlingSide::QueenSide.empty_path(Color::Black),
            Bitboard::from_square(Square::B8)
                .with(Square::C8)
                .with(Square::D8)
        );
        assert!(CastlingSide::QueenSide
            .king_path(Color::White)
            .contains(Square::C1));
        assert!(!CastlingSide::QueenSide
            .king_path(Color::White)
            .contains(Square::B1));
    }
}
