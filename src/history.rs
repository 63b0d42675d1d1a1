use crate::{
    moves::Move,
    outcome::{DrawReason, Outcome},
    position::{IllegalMoveError, Position, PositionId, Undo},
};

/// A position together with the moves that led to it.
///
/// Keeps the repetition identity of every position seen so far, so draws
/// by repetition can be detected, and allows taking back moves.
#[derive(Clone, Debug)]
pub struct PositionHistory {
    position: Position,
    identities: Vec<PositionId>,
    undos: Vec<(Move, Undo)>,
}

impl Default for PositionHistory {
    fn default() -> PositionHistory {
        PositionHistory::new()
    }
}

impl PositionHistory {
    /// A fresh game from the starting position.
    pub fn new() -> PositionHistory {
        PositionHistory::from_position(Position::new())
    }

    /// A game continuing from an arbitrary position. Repetitions from
    /// before this point cannot be seen.
    pub fn from_position(position: Position) -> PositionHistory {
        let identities = vec![position.id()];
        PositionHistory {
            position,
            identities,
            undos: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The number of moves played since the initial position.
    #[inline]
    pub fn len(&self) -> usize {
        self.undos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.undos.is_empty()
    }

    /// The moves played so far, oldest first.
    pub fn moves(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.undos.iter().map(|(m, _)| *m)
    }

    /// Plays a move after checking its legality.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] and leaves the game untouched if the
    /// move is not legal.
    pub fn play(&mut self, m: Move) -> Result<(), IllegalMoveError> {
        let undo = self.position.play(m)?;
        self.undos.push((m, undo));
        self.identities.push(self.position.id());
        Ok(())
    }

    /// Plays a move without checking its legality.
    pub fn play_unchecked(&mut self, m: Move) {
        let undo = self.position.play_unchecked(m);
        self.undos.push((m, undo));
        self.identities.push(self.position.id());
    }

    /// Takes back the last move, if any, and returns it.
    pub fn undo(&mut self) -> Option<Move> {
        let (m, undo) = self.undos.pop()?;
        self.identities.pop();
        self.position.undo_unchecked(m, undo);
        Some(m)
    }

    /// How often the current position has occurred, the current
    /// occurrence included.
    pub fn repetitions(&self) -> usize {
        let current = self
            .identities
            .last()
            .expect("at least the initial identity");
        self.identities.iter().filter(|id| *id == current).count()
    }

    /// The outcome of the game, including draws that apply automatically.
    ///
    /// A mate on the final move takes precedence over the 75 move and
    /// fivefold repetition rules.
    pub fn outcome(&self) -> Outcome {
        let outcome = self.position.outcome();
        if outcome == Outcome::Ongoing && self.repetitions() >= 5 {
            Outcome::Draw(DrawReason::FivefoldRepetition)
        } else {
            outcome
        }
    }

    /// A draw the player to move could claim, if any. Unlike
    /// [`PositionHistory::outcome`], these never end the game by
    /// themselves.
    pub fn claimable_draw(&self) -> Option<DrawReason> {
        if self.outcome().is_over() {
            return None;
        }
        if self.position.halfmoves() >= 100 {
            Some(DrawReason::FiftyMoves)
        } else if self.repetitions() >= 3 {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn shuffle_knights(game: &mut PositionHistory) {
        for &(from, to) in &[
            (Square::G1, Square::F3),
            (Square::G8, Square::F6),
            (Square::F3, Square::G1),
            (Square::F6, Square::G8),
        ] {
            game.play(Move::new(from, to)).expect("legal knight move");
        }
    }

    #[test]
    fn test_repetition_rules() {
        let mut game = PositionHistory::new();
        assert_eq!(game.repetitions(), 1);
        assert_eq!(game.claimable_draw(), None);

        shuffle_knights(&mut game);
        assert_eq!(game.repetitions(), 2);
        assert_eq!(game.claimable_draw(), None);

        shuffle_knights(&mut game);
        assert_eq!(game.repetitions(), 3);
        assert_eq!(
            game.claimable_draw(),
            Some(DrawReason::ThreefoldRepetition)
        );
        // A claimable draw does not end the game.
        assert_eq!(game.outcome(), Outcome::Ongoing);

        shuffle_knights(&mut game);
        assert_eq!(game.outcome(), Outcome::Ongoing);

        shuffle_knights(&mut game);
        assert_eq!(game.repetitions(), 5);
        assert_eq!(
            game.outcome(),
            Outcome::Draw(DrawReason::FivefoldRepetition)
        );
        assert_eq!(game.claimable_draw(), None);
    }

    #[test]
    fn test_undo() {
        let mut game = PositionHistory::new();
        game.play(Move::new(Square::E2, Square::E4)).expect("legal");
        game.play(Move::new(Square::C7, Square::C5)).expect("legal");
        assert_eq!(game.len(), 2);

        assert_eq!(game.undo(), Some(Move::new(Square::C7, Square::C5)));
        assert_eq!(game.undo(), Some(Move::new(Square::E2, Square::E4)));
        assert_eq!(game.undo(), None);

        assert_eq!(game.position(), &Position::new());
        assert_eq!(game.repetitions(), 1);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut game = PositionHistory::new();
        assert_eq!(
            game.play(Move::new(Square::E2, Square::E5)),
            Err(IllegalMoveError)
        );
        assert!(game.is_empty());
    }
}
