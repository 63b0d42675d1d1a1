//! Reading and writing Standard Algebraic Notation.

use std::{error::Error, fmt, str::FromStr};

use crate::{
    castling::CastlingSide,
    moves::Move,
    piece::PieceType,
    position::Position,
    square::{File, Rank, Square},
};

/// Error when parsing a syntactically invalid SAN.
#[derive(Clone, Debug)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl Error for ParseSanError {}

/// Error when a well formed SAN does not resolve to a unique legal move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SanError {
    /// No legal move matches the SAN.
    IllegalSan,
    /// More than one legal move matches the SAN.
    AmbiguousSan,
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SanError::IllegalSan => "illegal san",
            SanError::AmbiguousSan => "ambiguous san",
        })
    }
}

impl Error for SanError {}

/// A move in Standard Algebraic Notation, without check suffix.
///
/// A parsed SAN is only a description of a move. Matching it against a
/// position with [`San::to_move`] gives the move itself.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum San {
    Normal {
        piece_type: PieceType,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<PieceType>,
    },
    Castle(CastlingSide),
}

impl San {
    /// Parses a SAN from ASCII bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] on syntactically invalid input.
    pub fn from_ascii(s: &[u8]) -> Result<San, ParseSanError> {
        match s {
            b"O-O" | b"0-0" => return Ok(San::Castle(CastlingSide::KingSide)),
            b"O-O-O" | b"0-0-0" => return Ok(San::Castle(CastlingSide::QueenSide)),
            _ => (),
        }

        let (s, promotion) = if s.len() >= 2 && s[s.len() - 2] == b'=' {
            let promotion = PieceType::from_char(s[s.len() - 1] as char)
                .filter(|p| !matches!(p, PieceType::Pawn | PieceType::King))
                .ok_or(ParseSanError)?;
            (&s[..s.len() - 2], Some(promotion))
        } else {
            (s, None)
        };

        if s.len() < 2 {
            return Err(ParseSanError);
        }
        let to = Square::from_ascii(&s[s.len() - 2..]).map_err(|_| ParseSanError)?;
        let mut head = &s[..s.len() - 2];

        let piece_type = match head.first() {
            Some(ch) if ch.is_ascii_uppercase() => {
                let piece_type = PieceType::from_char(*ch as char)
                    .filter(|p| *p != PieceType::Pawn)
                    .ok_or(ParseSanError)?;
                head = &head[1..];
                piece_type
            }
            _ => PieceType::Pawn,
        };

        if promotion.is_some() && piece_type != PieceType::Pawn {
            return Err(ParseSanError);
        }

        let capture = match head.last() {
            Some(b'x') => {
                head = &head[..head.len() - 1];
                true
            }
            _ => false,
        };

        let file = match head.first() {
            Some(ch) => match File::from_char(*ch as char) {
                Some(file) => {
                    head = &head[1..];
                    Some(file)
                }
                None => None,
            },
            None => None,
        };

        let rank = match head.first() {
            Some(ch) => match Rank::from_char(*ch as char) {
                Some(rank) => {
                    head = &head[1..];
                    Some(rank)
                }
                None => None,
            },
            None => None,
        };

        if !head.is_empty() {
            return Err(ParseSanError);
        }

        Ok(San::Normal {
            piece_type,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// The SAN of a legal move in the given position, with the minimal
    /// disambiguation the position requires.
    pub fn from_move(position: &Position, m: Move) -> San {
        if let Some(side) = m.castling_side() {
            return San::Castle(side);
        }

        let piece_type = position
            .board()
            .piece_type_at(m.from)
            .unwrap_or(PieceType::Pawn);
        let capture = m.is_en_passant() || position.board().occupied().contains(m.to);

        let (file, rank) = if piece_type == PieceType::Pawn {
            (if capture { Some(m.from.file()) } else { None }, None)
        } else {
            let candidates = position.san_candidates(piece_type, m.to);
            let mut rivals = candidates.iter().filter(|c| c.from != m.from).peekable();

            if rivals.peek().is_none() {
                (None, None)
            } else if rivals.clone().all(|c| c.from.file() != m.from.file()) {
                (Some(m.from.file()), None)
            } else if rivals.all(|c| c.from.rank() != m.from.rank()) {
                (None, Some(m.from.rank()))
            } else {
                (Some(m.from.file()), Some(m.from.rank()))
            }
        };

        San::Normal {
            piece_type,
            file,
            rank,
            capture,
            to: m.to,
            promotion: m.promotion,
        }
    }

    /// Matches the SAN against the legal moves of a position.
    ///
    /// # Errors
    ///
    /// Returns [`SanError::IllegalSan`] if no legal move matches, and
    /// [`SanError::AmbiguousSan`] if more than one does.
    pub fn to_move(&self, position: &Position) -> Result<Move, SanError> {
        match *self {
            San::Castle(side) => position
                .castling_moves(side)
                .first()
                .copied()
                .ok_or(SanError::IllegalSan),
            San::Normal {
                piece_type,
                file,
                rank,
                capture: _,
                to,
                promotion,
            } => {
                let mut candidates = position.san_candidates(piece_type, to);
                candidates.retain(|m| {
                    m.promotion == promotion
                        && file.map_or(true, |file| m.from.file() == file)
                        && rank.map_or(true, |rank| m.from.rank() == rank)
                });
                match candidates.as_slice() {
                    [] => Err(SanError::IllegalSan),
                    [m] => Ok(*m),
                    _ => Err(SanError::AmbiguousSan),
                }
            }
        }
    }
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<San, ParseSanError> {
        San::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Castle(CastlingSide::KingSide) => f.write_str("O-O"),
            San::Castle(CastlingSide::QueenSide) => f.write_str("O-O-O"),
            San::Normal {
                piece_type,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if piece_type != PieceType::Pawn {
                    write!(f, "{}", piece_type.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{file}")?;
                }
                if let Some(rank) = rank {
                    write!(f, "{rank}")?;
                }
                if capture {
                    f.write_str("x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
        }
    }
}

/// `+` or `#`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }
}

/// A SAN with an optional check or checkmate suffix.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Parses a SAN with optional suffix from ASCII bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] on syntactically invalid input.
    pub fn from_ascii(s: &[u8]) -> Result<SanPlus, ParseSanError> {
        let (s, suffix) = match s.last() {
            Some(b'+') => (&s[..s.len() - 1], Some(Suffix::Check)),
            Some(b'#') => (&s[..s.len() - 1], Some(Suffix::Checkmate)),
            _ => (s, None),
        };
        Ok(SanPlus {
            san: San::from_ascii(s)?,
            suffix,
        })
    }

    /// The suffixed SAN of a legal move in the given position.
    pub fn from_move(position: &Position, m: Move) -> SanPlus {
        let san = San::from_move(position, m);
        let mut after = position.clone();
        after.play_unchecked(m);
        let suffix = if after.is_checkmate() {
            Some(Suffix::Checkmate)
        } else if after.is_check() {
            Some(Suffix::Check)
        } else {
            None
        };
        SanPlus { san, suffix }
    }
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{}", suffix.char())?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SanPlus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SanPlus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<SanPlus, D::Error> {
        struct SanPlusVisitor;

        impl serde::de::Visitor<'_> for SanPlusVisitor {
            type Value = SanPlus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a SAN string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<SanPlus, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(SanPlusVisitor)
    }
}
