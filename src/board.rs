use std::{fmt, fmt::Write as _};

use crate::{
    attacks,
    bitboard::Bitboard,
    color::{ByColor, Color},
    piece::{ByPieceType, Piece, PieceType},
    square::{File, Rank, Square},
};

/// The piece placement only, with no turn, castling or en passant state.
///
/// Kept as one bitboard per piece type and one per color. The union of
/// the color boards is cached in `occupied`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    by_piece_type: ByPieceType<Bitboard>,
    by_color: ByColor<Bitboard>,
    occupied: Bitboard,
}

impl Board {
    /// The starting position of standard chess.
    pub const fn new() -> Board {
        Board {
            by_piece_type: ByPieceType {
                pawn: Bitboard(0x00ff_0000_0000_ff00),
                knight: Bitboard(0x4200_0000_0000_0042),
                bishop: Bitboard(0x2400_0000_0000_0024),
                rook: Bitboard(0x8100_0000_0000_0081),
                queen: Bitboard(0x0800_0000_0000_0008),
                king: Bitboard(0x1000_0000_0000_0010),
            },
            by_color: ByColor {
                white: Bitboard(0xffff),
                black: Bitboard(0xffff_0000_0000_0000),
            },
            occupied: Bitboard(0xffff_0000_0000_ffff),
        }
    }

    /// An empty board.
    pub const fn empty() -> Board {
        Board {
            by_piece_type: ByPieceType {
                pawn: Bitboard::EMPTY,
                knight: Bitboard::EMPTY,
                bishop: Bitboard::EMPTY,
                rook: Bitboard::EMPTY,
                queen: Bitboard::EMPTY,
                king: Bitboard::EMPTY,
            },
            by_color: ByColor {
                white: Bitboard::EMPTY,
                black: Bitboard::EMPTY,
            },
            occupied: Bitboard::EMPTY,
        }
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub const fn by_color(&self, color: Color) -> Bitboard {
        *self.by_color.get(color)
    }

    #[inline]
    pub const fn by_piece_type(&self, piece_type: PieceType) -> Bitboard {
        *self.by_piece_type.get(piece_type)
    }

    #[inline]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.by_color(piece.color) & self.by_piece_type(piece.piece_type)
    }

    #[inline]
    pub const fn pawns(&self) -> Bitboard {
        self.by_piece_type.pawn
    }

    #[inline]
    pub const fn knights(&self) -> Bitboard {
        self.by_piece_type.knight
    }

    #[inline]
    pub const fn bishops(&self) -> Bitboard {
        self.by_piece_type.bishop
    }

    #[inline]
    pub const fn rooks(&self) -> Bitboard {
        self.by_piece_type.rook
    }

    #[inline]
    pub const fn queens(&self) -> Bitboard {
        self.by_piece_type.queen
    }

    #[inline]
    pub const fn kings(&self) -> Bitboard {
        self.by_piece_type.king
    }

    /// Rooks and queens.
    #[inline]
    pub fn rooks_and_queens(&self) -> Bitboard {
        self.by_piece_type.rook | self.by_piece_type.queen
    }

    /// Bishops and queens.
    #[inline]
    pub fn bishops_and_queens(&self) -> Bitboard {
        self.by_piece_type.bishop | self.by_piece_type.queen
    }

    pub fn piece_type_at(&self, sq: Square) -> Option<PieceType> {
        if !self.occupied.contains(sq) {
            return None;
        }
        PieceType::ALL
            .into_iter()
            .find(|&piece_type| self.by_piece_type(piece_type).contains(sq))
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.by_color.white.contains(sq) {
            Some(Color::White)
        } else if self.by_color.black.contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let color = self.color_at(sq)?;
        let piece_type = self.piece_type_at(sq)?;
        Some(Piece { color, piece_type })
    }

    /// The square of the king of `color`, if on the board.
    #[inline]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        (self.kings() & self.by_color(color)).single_square()
    }

    /// Removes the piece at `sq`, if any, and returns it.
    pub fn discard_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_at(sq)?;
        self.by_piece_type.get_mut(piece.piece_type).discard(sq);
        self.by_color.get_mut(piece.color).discard(sq);
        self.occupied.discard(sq);
        Some(piece)
    }

    /// Puts `piece` on `sq`, replacing whatever was there.
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.discard_piece_at(sq);
        self.by_piece_type.get_mut(piece.piece_type).add(sq);
        self.by_color.get_mut(piece.color).add(sq);
        self.occupied.add(sq);
    }

    /// All pieces of `attacker` that attack `sq`, on a board with the
    /// given `occupied` squares.
    ///
    /// The occupancy is passed separately so king moves can be checked
    /// with the king itself removed from the board.
    pub fn attacks_to(&self, sq: Square, attacker: Color, occupied: Bitboard) -> Bitboard {
        self.by_color(attacker)
            & ((attacks::rook_attacks(sq, occupied) & self.rooks_and_queens())
                | (attacks::bishop_attacks(sq, occupied) & self.bishops_and_queens())
                | (attacks::knight_attacks(sq) & self.knights())
                | (attacks::king_attacks(sq) & self.kings())
                | (attacks::pawn_attacks(!attacker, sq) & self.pawns()))
    }

    /// Iterates over all pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied
            .filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let sq = Square::from_coords(file, rank);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
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
    fn test_starting_position() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
        assert_eq!(board.piece_at(Square::D8), Some(Color::Black.queen()));
        assert_eq!(board.piece_at(Square::E4), None);
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
    }

    #[test]
    fn test_set_and_discard() {
        let mut board = Board::empty();
        board.set_piece_at(Square::D5, Color::White.knight());
        assert_eq!(board.piece_at(Square::D5), Some(Color::White.knight()));

        board.set_piece_at(Square::D5, Color::Black.rook());
        assert_eq!(board.piece_at(Square::D5), Some(Color::Black.rook()));
        assert_eq!(board.occupied().count(), 1);

        assert_eq!(board.discard_piece_at(Square::D5), Some(Color::Black.rook()));
        assert_eq!(board.discard_piece_at(Square::D5), None);
        assert!(board.occupied().is_empty());
    }

    #[test]
    fn test_attacks_to() {
        let board = Board::new();
        let attackers = board.attacks_to(Square::F3, Color::White, board.occupied());
        assert_eq!(
            attackers,
            Bitboard::from_square(Square::E2)
                .with(Square::G2)
                .with(Square::G1)
        );
        assert!(board
            .attacks_to(Square::E4, Color::Black, board.occupied())
            .is_empty());
    }
}
