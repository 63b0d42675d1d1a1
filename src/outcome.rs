use std::fmt;

use crate::color::Color;

/// Why a game is drawn.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum DrawReason {
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
    /// 75 moves by both players without a capture or pawn move. Applies
    /// automatically.
    SeventyFiveMoves,
    /// The same position occurred five times. Applies automatically.
    FivefoldRepetition,
    /// 50 moves by both players without a capture or pawn move. Only a
    /// claim, never applied automatically.
    FiftyMoves,
    /// The same position occurred three times. Only a claim, never
    /// applied automatically.
    ThreefoldRepetition,
}

/// The state of a game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Outcome {
    /// The game goes on.
    Ongoing,
    /// The player to move has been mated.
    Checkmate { winner: Color },
    /// The player to move has no legal move but is not in check.
    Stalemate,
    /// The game ended in a draw for the given reason.
    Draw(DrawReason),
}

impl Outcome {
    /// The winning side, if the game has been decided.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Tests if the game has ended.
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Ongoing => "*",
            Outcome::Checkmate {
                winner: Color::White,
            } => "1-0",
            Outcome::Checkmate {
                winner: Color::Black,
            } => "0-1",
            Outcome::Stalemate | Outcome::Draw(_) => "1/2-1/2",
        })
    }
}
