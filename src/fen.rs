//! Parsing and writing Forsyth-Edwards Notation.

use std::{error::Error, fmt, num::NonZeroU32, str::FromStr};

use crate::{
    board::Board,
    castling::{CastlingRights, CastlingSide},
    color::Color,
    piece::Piece,
    position::{Position, PositionError},
    square::{File, Rank, Square},
};

/// The FEN of the starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Error when parsing an invalid FEN.
#[derive(Clone, Debug)]
pub enum ParseFenError {
    /// The piece placement field is malformed.
    InvalidBoard,
    /// The side to move is neither `w` nor `b`.
    InvalidTurn,
    /// The castling field contains unexpected characters.
    InvalidCastling,
    /// The en passant field is neither `-` nor a square name.
    InvalidEpSquare,
    /// The halfmove clock is not a number.
    InvalidHalfmoves,
    /// The fullmove number is not a number.
    InvalidFullmoves,
    /// Unexpected input after the six FEN fields.
    TrailingInput,
    /// All fields are well formed, but the described position breaks the
    /// rules of standard chess.
    InvalidPosition(PositionError),
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::InvalidBoard => f.write_str("invalid board part in fen"),
            ParseFenError::InvalidTurn => f.write_str("invalid turn part in fen"),
            ParseFenError::InvalidCastling => f.write_str("invalid castling part in fen"),
            ParseFenError::InvalidEpSquare => f.write_str("invalid en passant part in fen"),
            ParseFenError::InvalidHalfmoves => f.write_str("invalid halfmove clock in fen"),
            ParseFenError::InvalidFullmoves => f.write_str("invalid fullmove number in fen"),
            ParseFenError::TrailingInput => f.write_str("trailing input after fen"),
            ParseFenError::InvalidPosition(err) => write!(f, "illegal position in fen: {err}"),
        }
    }
}

impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PositionError> for ParseFenError {
    fn from(err: PositionError) -> ParseFenError {
        ParseFenError::InvalidPosition(err)
    }
}

/// A [`Position`] with its FEN representation.
///
/// ```
/// use shatranj::{Fen, Color};
///
/// let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
///     .parse()?;
/// assert_eq!(fen.0.turn(), Color::Black);
/// # Ok::<_, shatranj::ParseFenError>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Fen(pub Position);

impl Fen {
    pub fn into_position(self) -> Position {
        self.0
    }
}

impl From<Position> for Fen {
    fn from(position: Position) -> Fen {
        Fen(position)
    }
}

fn parse_board(part: &str) -> Result<Board, ParseFenError> {
    let mut board = Board::empty();
    let mut ranks = part.split('/');

    for rank in Rank::ALL.into_iter().rev() {
        let row = ranks.next().ok_or(ParseFenError::InvalidBoard)?;
        let mut file = 0u32;
        for ch in row.chars() {
            if let Some(skip) = ch.to_digit(9).filter(|skip| *skip >= 1) {
                file += skip;
            } else {
                let piece = Piece::from_char(ch).ok_or(ParseFenError::InvalidBoard)?;
                let sq = File::from_index(file)
                    .map(|file| Square::from_coords(file, rank))
                    .ok_or(ParseFenError::InvalidBoard)?;
                board.set_piece_at(sq, piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(ParseFenError::InvalidBoard);
        }
    }

    if ranks.next().is_some() {
        return Err(ParseFenError::InvalidBoard);
    }
    Ok(board)
}

fn parse_castling(part: &str) -> Result<CastlingRights, ParseFenError> {
    if part == "-" {
        return Ok(CastlingRights::empty());
    }
    let mut castling = CastlingRights::empty();
    for ch in part.chars() {
        castling |= match ch {
            'K' => CastlingRights::WHITE_KING_SIDE,
            'Q' => CastlingRights::WHITE_QUEEN_SIDE,
            'k' => CastlingRights::BLACK_KING_SIDE,
            'q' => CastlingRights::BLACK_QUEEN_SIDE,
            _ => return Err(ParseFenError::InvalidCastling),
        };
    }
    Ok(castling)
}

impl FromStr for Fen {
    type Err = ParseFenError;

    /// Parses a FEN. The last four fields may be left off and default to
    /// `- - 0 1`.
    fn from_str(s: &str) -> Result<Fen, ParseFenError> {
        let mut parts = s.split_ascii_whitespace();

        let board = parse_board(parts.next().ok_or(ParseFenError::InvalidBoard)?)?;

        let turn = match parts.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        let castling = parts.next().map_or(Ok(CastlingRights::empty()), parse_castling)?;

        let ep_square = match parts.next() {
            Some("-") | None => None,
            Some(name) => Some(name.parse().map_err(|_| ParseFenError::InvalidEpSquare)?),
        };

        let halfmoves = match parts.next() {
            Some(part) => {
                btoi::btou(part.as_bytes()).map_err(|_| ParseFenError::InvalidHalfmoves)?
            }
            None => 0,
        };

        let fullmoves = match parts.next() {
            Some(part) => btoi::btou(part.as_bytes())
                .map(|n: u32| NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN))
                .map_err(|_| ParseFenError::InvalidFullmoves)?,
            None => NonZeroU32::MIN,
        };

        if parts.next().is_some() {
            return Err(ParseFenError::TrailingInput);
        }

        Ok(Fen(Position::from_parts(
            board, turn, castling, ep_square, halfmoves, fullmoves,
        )?))
    }
}

fn write_board(f: &mut fmt::Formatter<'_>, board: &Board) -> fmt::Result {
    for rank in Rank::ALL.into_iter().rev() {
        let mut empty = 0;
        for file in File::ALL {
            match board.piece_at(Square::from_coords(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        write!(f, "{empty}")?;
                        empty = 0;
                    }
                    write!(f, "{}", piece.char())?;
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            write!(f, "{empty}")?;
        }
        if rank != Rank::First {
            write!(f, "/")?;
        }
    }
    Ok(())
}

fn write_castling(f: &mut fmt::Formatter<'_>, castling: CastlingRights) -> fmt::Result {
    if castling.is_empty() {
        return write!(f, "-");
    }
    for color in Color::ALL {
        for side in CastlingSide::ALL {
            if castling.has(color, side) {
                let ch = if side.is_king_side() { 'K' } else { 'Q' };
                write!(f, "{}", if color.is_white() { ch } else { ch.to_ascii_lowercase() })?;
            }
        }
    }
    Ok(())
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = &self.0;
        write_board(f, position.board())?;
        write!(f, " {} ", position.turn().char())?;
        write_castling(f, position.castling())?;
        match position.ep_square() {
            Some(ep) => write!(f, " {ep}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", position.halfmoves(), position.fullmoves())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fen {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fen {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Fen, D::Error> {
        struct FenVisitor;

        impl serde::de::Visitor<'_> for FenVisitor {
            type Value = Fen;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a FEN string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Fen, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(FenVisitor)
    }
}
