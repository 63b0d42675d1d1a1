//! A library for the rules of standard chess: legal move generation,
//! reversible move making, FEN and SAN notation, and outcome detection
//! including all draw rules.
//!
//! # Examples
//!
//! Play the fool's mate from the starting position:
//!
//! ```
//! use shatranj::{Color, Outcome, Position, San};
//!
//! let mut position = Position::new();
//! for san in ["g4", "e5", "f3", "Qh4"] {
//!     let m = san.parse::<San>()?.to_move(&position)?;
//!     position.play_unchecked(m);
//! }
//!
//! assert_eq!(
//!     position.outcome(),
//!     Outcome::Checkmate {
//!         winner: Color::Black,
//!     }
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Set up a position from a FEN and track a game with repetition
//! detection:
//!
//! ```
//! use shatranj::{Fen, PositionHistory};
//!
//! let fen: Fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
//!     .parse()?;
//! let game = PositionHistory::from_position(fen.into_position());
//! assert_eq!(game.repetitions(), 1);
//! # Ok::<_, shatranj::ParseFenError>(())
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize` and `Deserialize` for [`Fen`], [`SanPlus`] and
//!   [`Lan`], using their string representations.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod attacks;
pub mod fen;
pub mod lan;
pub mod san;

mod bitboard;
mod board;
mod castling;
mod color;
mod history;
mod moves;
mod outcome;
mod perft;
mod piece;
mod position;
mod square;

pub use crate::{
    bitboard::Bitboard,
    board::Board,
    castling::{CastlingRights, CastlingSide},
    color::{ByColor, Color, ParseColorError},
    fen::{Fen, ParseFenError, STARTING_FEN},
    history::PositionHistory,
    lan::{Lan, ParseLanError},
    moves::{Move, MoveFlags, MoveList},
    outcome::{DrawReason, Outcome},
    perft::{perft, perft_divide},
    piece::{ByPieceType, Piece, PieceType},
    position::{IllegalMoveError, Position, PositionError, PositionId, Undo},
    san::{ParseSanError, San, SanError, SanPlus, Suffix},
    square::{File, ParseSquareError, Rank, Square},
};
