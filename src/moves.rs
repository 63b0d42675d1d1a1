use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::{
    castling::CastlingSide,
    color::Color,
    piece::PieceType,
    square::Square,
};

bitflags! {
    /// Markers for the two move kinds that are not plain piece
    /// displacements.
    #[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
    pub struct MoveFlags: u8 {
        const EN_PASSANT = 1;
        const CASTLE = 1 << 1;
    }
}

/// A move, before or after legality checking.
///
/// Castling is encoded as the king move to its final square, for example
/// `e1g1` for white O-O. The rook displacement is implied.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub flags: MoveFlags,
}

impl Move {
    /// A plain move or capture.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    /// A pawn push or capture onto the last rank.
    #[inline]
    pub const fn promotion(from: Square, to: Square, promotion: PieceType) -> Move {
        Move {
            from,
            to,
            promotion: Some(promotion),
            flags: MoveFlags::empty(),
        }
    }

    /// An en passant capture, `to` being the vacated target square.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
            flags: MoveFlags::EN_PASSANT,
        }
    }

    /// A castling move of the king of `color` to the given side.
    #[inline]
    pub const fn castle(color: Color, side: CastlingSide) -> Move {
        Move {
            from: match color {
                Color::White => Square::E1,
                Color::Black => Square::E8,
            },
            to: side.king_to(color),
            promotion: None,
            flags: MoveFlags::CASTLE,
        }
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// The castling side, if this is a castling move.
    pub fn castling_side(self) -> Option<CastlingSide> {
        if self.is_castle() {
            Some(if self.to.file() > self.from.file() {
                CastlingSide::KingSide
            } else {
                CastlingSide::QueenSide
            })
        } else {
            None
        }
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited to 256 moves. There is no position with more
/// legal moves, and it is also sufficient for all pseudo-legal move sets
/// generated here.
pub type MoveList = ArrayVec<Move, 256>;
