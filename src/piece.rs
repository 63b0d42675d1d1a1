use crate::color::Color;

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Gets the piece type from its English letter, in either case.
    pub const fn from_char(ch: char) -> Option<PieceType> {
        match ch {
            'P' | 'p' => Some(PieceType::Pawn),
            'N' | 'n' => Some(PieceType::Knight),
            'B' | 'b' => Some(PieceType::Bishop),
            'R' | 'r' => Some(PieceType::Rook),
            'Q' | 'q' => Some(PieceType::Queen),
            'K' | 'k' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Gets a [`Piece`] of the given color.
    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece {
            color,
            piece_type: self,
        }
    }

    /// Gets the lowercase English letter for the piece type.
    pub const fn char(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// Gets the uppercase English letter for the piece type.
    pub const fn upper_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// All piece types, pawn first.
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// The piece types a pawn can promote to, strongest first.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];
}

/// A piece with [`Color`] and [`PieceType`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    /// The FEN letter for the piece, uppercase for white.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.piece_type.upper_char(),
            Color::Black => self.piece_type.char(),
        }
    }

    /// Gets a piece from its FEN letter, with case selecting the color.
    pub const fn from_char(ch: char) -> Option<Piece> {
        match PieceType::from_char(ch) {
            Some(piece_type) => {
                Some(piece_type.of(Color::from_white(ch as u8 & 32 == 0)))
            }
            None => None,
        }
    }
}

/// Container with a value for each [`PieceType`].
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct ByPieceType<T> {
    pub pawn: T,
    pub knight: T,
    pub bishop: T,
    pub rook: T,
    pub queen: T,
    pub king: T,
}

impl<T> ByPieceType<T> {
    #[inline]
    pub const fn get(&self, piece_type: PieceType) -> &T {
        match piece_type {
            PieceType::Pawn => &self.pawn,
            PieceType::Knight => &self.knight,
            PieceType::Bishop => &self.bishop,
            PieceType::Rook => &self.rook,
            PieceType::Queen => &self.queen,
            PieceType::King => &self.king,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, piece_type: PieceType) -> &mut T {
        match piece_type {
            PieceType::Pawn => &mut self.pawn,
            PieceType::Knight => &mut self.knight,
            PieceType::Bishop => &mut self.bishop,
            PieceType::Rook => &mut self.rook,
            PieceType::Queen => &mut self.queen,
            PieceType::King => &mut self.king,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Piece::from_char('K'), Some(Color::White.king()));
        assert_eq!(Piece::from_char('q'), Some(Color::Black.queen()));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_char_roundtrip() {
        for color in Color::ALL {
            for piece_type in PieceType::ALL {
                let piece = piece_type.of(color);
                assert_eq!(Piece::from_char(piece.char()), Some(piece));
            }
        }
    }
}
