//! Reading and writing moves in long algebraic notation, as used by the
//! UCI protocol: source square, target square and an optional promotion
//! piece, for example `e2e4` or `e7e8q`.

use std::{error::Error, fmt, str::FromStr};

use crate::{
    moves::Move,
    piece::PieceType,
    position::{IllegalMoveError, Position},
    square::Square,
};

/// Error when parsing a syntactically invalid long algebraic move.
#[derive(Clone, Debug)]
pub struct ParseLanError;

impl fmt::Display for ParseLanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid long algebraic notation")
    }
}

impl Error for ParseLanError {}

/// A move in long algebraic notation.
///
/// Castling is written as the king move, `e1g1` for white O-O. Like
/// [`San`](crate::San), this is only a description: matching it against a
/// position with [`Lan::to_move`] restores the castling and en passant
/// markers.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Lan {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Lan {
    /// Parses a move from ASCII bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseLanError`] on syntactically invalid input.
    pub fn from_ascii(s: &[u8]) -> Result<Lan, ParseLanError> {
        if s.len() != 4 && s.len() != 5 {
            return Err(ParseLanError);
        }
        let from = Square::from_ascii(&s[0..2]).map_err(|_| ParseLanError)?;
        let to = Square::from_ascii(&s[2..4]).map_err(|_| ParseLanError)?;
        let promotion = match s.get(4) {
            Some(ch) => Some(
                PieceType::from_char(ch.to_ascii_lowercase() as char)
                    .filter(|p| !matches!(p, PieceType::Pawn | PieceType::King))
                    .ok_or(ParseLanError)?,
            ),
            None => None,
        };
        Ok(Lan {
            from,
            to,
            promotion,
        })
    }

    /// The notation of a move.
    pub const fn from_move(m: Move) -> Lan {
        Lan {
            from: m.from,
            to: m.to,
            promotion: m.promotion,
        }
    }

    /// Matches the notation against the legal moves of a position,
    /// restoring castling and en passant markers.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if no legal move matches.
    pub fn to_move(&self, position: &Position) -> Result<Move, IllegalMoveError> {
        position
            .legal_moves()
            .iter()
            .copied()
            .find(|m| m.from == self.from && m.to == self.to && m.promotion == self.promotion)
            .ok_or(IllegalMoveError)
    }
}

impl From<Move> for Lan {
    fn from(m: Move) -> Lan {
        Lan::from_move(m)
    }
}

impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Lan, ParseLanError> {
        Lan::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Lan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Lan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Lan {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Lan, D::Error> {
        struct LanVisitor;

        impl serde::de::Visitor<'_> for LanVisitor {
            type Value = Lan;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a move in long algebraic notation")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Lan, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(LanVisitor)
    }
}
