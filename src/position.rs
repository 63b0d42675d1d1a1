use std::{error::Error, fmt, num::NonZeroU32};

use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    castling::{CastlingRights, CastlingSide},
    color::Color,
    moves::{Move, MoveList},
    outcome::{DrawReason, Outcome},
    piece::{Piece, PieceType},
    square::{File, Rank, Square},
};

/// Error when constructing a position that breaks the rules of standard
/// chess, for example from a FEN with both kings missing.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PositionError {
    /// A side has no king.
    MissingKing,
    /// A side has more than one king.
    TooManyKings,
    /// There are pawns on the first or eighth rank.
    PawnsOnBackrank,
    /// A castling right without king and rook on their home squares.
    InvalidCastlingRights,
    /// The en passant square does not fit a just played double pawn push.
    InvalidEpSquare,
    /// The side not to move is in check.
    OppositeCheck,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PositionError::MissingKing => "missing king",
            PositionError::TooManyKings => "too many kings",
            PositionError::PawnsOnBackrank => "pawns on backrank",
            PositionError::InvalidCastlingRights => "invalid castling rights",
            PositionError::InvalidEpSquare => "invalid en passant square",
            PositionError::OppositeCheck => "opposite check",
        })
    }
}

impl Error for PositionError {}

/// Error when trying to play an illegal move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct IllegalMoveError;

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal move")
    }
}

impl Error for IllegalMoveError {}

/// The state removed from a position by playing a move. Passing it back
/// together with the same move restores the previous position exactly.
#[derive(Copy, Clone, Debug)]
pub struct Undo {
    moved: Piece,
    captured: Option<Piece>,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

/// Everything that distinguishes positions for repetition purposes:
/// piece placement, side to move, castling rights and the en passant
/// square, the latter only when an en passant capture is actually legal.
///
/// Move counters are deliberately not part of the identity.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PositionId {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
}

/// A legal chess position, always consistent: both kings on the board,
/// the side not to move never in check.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Position {
    board: Board,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

impl Position {
    /// The starting position of standard chess.
    pub const fn new() -> Position {
        Position {
            board: Board::new(),
            turn: Color::White,
            castling: CastlingRights::all(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// Sets up an arbitrary position, validating that it is reachable
    /// under standard rules as far as cheaply possible.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if the setup breaks a rule of standard
    /// chess.
    pub fn from_parts(
        board: Board,
        turn: Color,
        castling: CastlingRights,
        ep_square: Option<Square>,
        halfmoves: u32,
        fullmoves: NonZeroU32,
    ) -> Result<Position, PositionError> {
        for color in Color::ALL {
            match (board.kings() & board.by_color(color)).count() {
                0 => return Err(PositionError::MissingKing),
                1 => (),
                _ => return Err(PositionError::TooManyKings),
            }
        }

        if (board.pawns() & (Bitboard::from_rank(Rank::First) | Bitboard::from_rank(Rank::Eighth)))
            .any()
        {
            return Err(PositionError::PawnsOnBackrank);
        }

        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if castling.has(color, side)
                    && (board.piece_at(Square::from_coords(File::E, color.backrank()))
                        != Some(color.king())
                        || board.piece_at(side.rook_from(color)) != Some(color.rook()))
                {
                    return Err(PositionError::InvalidCastlingRights);
                }
            }
        }

        if let Some(ep) = ep_square {
            let vacated = ep.offset(turn.fold(8, -8));
            let pawn_square = ep.offset(turn.fold(-8, 8));
            if !Bitboard::relative_rank(turn, Rank::Sixth).contains(ep)
                || board.occupied().contains(ep)
                || vacated.map_or(true, |sq| board.occupied().contains(sq))
                || pawn_square.and_then(|sq| board.piece_at(sq)) != Some((!turn).pawn())
            {
                return Err(PositionError::InvalidEpSquare);
            }
        }

        let position = Position {
            board,
            turn,
            castling,
            ep_square,
            halfmoves,
            fullmoves,
        };

        if let Some(their_king) = board.king_of(!turn) {
            if board.attacks_to(their_king, turn, board.occupied()).any() {
                return Err(PositionError::OppositeCheck);
            }
        }

        Ok(position)
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub const fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// The en passant target square from the FEN, regardless of whether a
    /// capture to it is legal.
    #[inline]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub const fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Move number, starting at 1 and incremented after each black move.
    #[inline]
    pub const fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    #[inline]
    fn us(&self) -> Bitboard {
        self.board.by_color(self.turn)
    }

    #[inline]
    fn them(&self) -> Bitboard {
        self.board.by_color(!self.turn)
    }

    #[inline]
    fn our(&self, piece_type: PieceType) -> Bitboard {
        self.us() & self.board.by_piece_type(piece_type)
    }

    fn our_king(&self) -> Square {
        self.board
            .king_of(self.turn)
            .expect("legal position has a king")
    }

    /// Tests if any piece of `color` attacks the given square.
    pub fn is_attacked(&self, color: Color, sq: Square) -> bool {
        self.board
            .attacks_to(sq, color, self.board.occupied())
            .any()
    }

    /// The pieces giving check.
    pub fn checkers(&self) -> Bitboard {
        self.board
            .attacks_to(self.our_king(), !self.turn, self.board.occupied())
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.checkers().any()
    }

    /// Generates all legal moves.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let king = self.our_king();
        let checkers = self.checkers();

        if checkers.is_empty() {
            let target = !self.us();
            self.gen_pawn_moves(target, &mut moves);
            self.gen_piece_moves(target, &mut moves);
            self.gen_king_moves(king, target, &mut moves);
            self.gen_castling_moves(&mut moves);
            self.gen_en_passant(&mut moves);
        } else {
            self.gen_evasions(king, checkers, &mut moves);
        }

        let blockers = self.slider_blockers(king);
        moves.retain(|m| self.is_safe(king, *m, blockers));
        moves
    }

    /// Tests a single move for legality.
    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves().contains(&m)
    }

    /// Legal moves of pieces of the given type to the given square,
    /// castling excluded. This is the candidate set consulted for SAN
    /// disambiguation.
    pub fn san_candidates(&self, piece_type: PieceType, to: Square) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|m| {
            !m.is_castle() && m.to == to && self.board.piece_type_at(m.from) == Some(piece_type)
        });
        moves
    }

    /// Legal castling moves to the given side.
    pub fn castling_moves(&self, side: CastlingSide) -> MoveList {
        let mut moves = self.legal_moves();
        moves.retain(|m| m.castling_side() == Some(side));
        moves
    }

    /// The en passant square, but only if a capture to it is actually
    /// legal in this position.
    pub fn legal_ep_square(&self) -> Option<Square> {
        self.ep_square
            .filter(|_| self.legal_moves().iter().any(|m| m.is_en_passant()))
    }

    /// The repetition identity of this position.
    pub fn id(&self) -> PositionId {
        PositionId {
            board: self.board,
            turn: self.turn,
            castling: self.castling,
            ep_square: self.legal_ep_square(),
        }
    }

    /// Plays a move after checking its legality.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] and leaves the position untouched if
    /// the move is not legal.
    pub fn play(&mut self, m: Move) -> Result<Undo, IllegalMoveError> {
        if self.is_legal(m) {
            Ok(self.play_unchecked(m))
        } else {
            Err(IllegalMoveError)
        }
    }

    /// Plays a move without checking its legality. The caller must pass a
    /// move that [`Position::legal_moves`] would generate for this exact
    /// position.
    pub fn play_unchecked(&mut self, m: Move) -> Undo {
        let turn = self.turn;
        let moved = self
            .board
            .piece_at(m.from)
            .expect("legal move has a piece on its source square");

        let undo = Undo {
            moved,
            captured: None,
            castling: self.castling,
            ep_square: self.ep_square,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        };

        self.ep_square = None;
        let mut captured = None;

        if m.is_castle() {
            let side = if m.to.file() > m.from.file() {
                CastlingSide::KingSide
            } else {
                CastlingSide::QueenSide
            };
            self.board.discard_piece_at(m.from);
            self.board.discard_piece_at(side.rook_from(turn));
            self.board.set_piece_at(m.to, turn.king());
            self.board.set_piece_at(side.rook_to(turn), turn.rook());
            self.castling.discard_color(turn);
        } else if m.is_en_passant() {
            captured = self
                .board
                .discard_piece_at(Square::from_coords(m.to.file(), m.from.rank()));
            self.board.discard_piece_at(m.from);
            self.board.set_piece_at(m.to, moved);
        } else {
            captured = self.board.discard_piece_at(m.to);
            self.board.discard_piece_at(m.from);
            self.board
                .set_piece_at(m.to, m.promotion.map_or(moved, |promotion| promotion.of(turn)));

            if moved.piece_type == PieceType::Pawn
                && (m.to.index() as i32 - m.from.index() as i32).abs() == 16
            {
                self.ep_square = m.from.offset(turn.fold(8, -8));
            }

            self.castling.discard_square(m.from);
            self.castling.discard_square(m.to);
        }

        self.halfmoves = if moved.piece_type == PieceType::Pawn || captured.is_some() {
            0
        } else {
            self.halfmoves + 1
        };
        if turn.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.turn = !turn;

        Undo { captured, ..undo }
    }

    /// Takes back a move, restoring the position it was played in. The
    /// undo token must come from playing exactly that move on this
    /// position.
    pub fn undo_unchecked(&mut self, m: Move, undo: Undo) {
        self.turn = !self.turn;
        let turn = self.turn;

        if m.is_castle() {
            let side = if m.to.file() > m.from.file() {
                CastlingSide::KingSide
            } else {
                CastlingSide::QueenSide
            };
            self.board.discard_piece_at(m.to);
            self.board.discard_piece_at(side.rook_to(turn));
            self.board.set_piece_at(m.from, turn.king());
            self.board.set_piece_at(side.rook_from(turn), turn.rook());
        } else {
            self.board.discard_piece_at(m.to);
            self.board.set_piece_at(m.from, undo.moved);
            if let Some(captured) = undo.captured {
                let sq = if m.is_en_passant() {
                    Square::from_coords(m.to.file(), m.from.rank())
                } else {
                    m.to
                };
                self.board.set_piece_at(sq, captured);
            }
        }

        self.castling = undo.castling;
        self.ep_square = undo.ep_square;
        self.halfmoves = undo.halfmoves;
        self.fullmoves = undo.fullmoves;
    }

    /// Tests if the side to move has been mated.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    /// Tests if the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Tests for the dead positions in which neither side can possibly
    /// deliver mate: king against king, king and one minor piece against
    /// king, and king and bishop each with both bishops on squares of the
    /// same color.
    pub fn is_insufficient_material(&self) -> bool {
        if (self.board.pawns() | self.board.rooks_and_queens()).any() {
            return false;
        }

        match self.board.occupied().count() {
            2 => true,
            3 => true,
            4 => {
                let bishops = self.board.bishops();
                (bishops & self.board.by_color(Color::White)).count() == 1
                    && (bishops & self.board.by_color(Color::Black)).count() == 1
                    && ((bishops & Bitboard::DARK_SQUARES) == bishops
                        || (bishops & Bitboard::LIGHT_SQUARES) == bishops)
            }
            _ => false,
        }
    }

    /// The outcome of the game as far as it can be judged from the
    /// position alone. Repetitions need the game history, see
    /// [`PositionHistory::outcome`](crate::PositionHistory::outcome).
    ///
    /// A mate on the final move takes precedence over the 75 move rule.
    pub fn outcome(&self) -> Outcome {
        if self.legal_moves().is_empty() {
            if self.is_check() {
                Outcome::Checkmate { winner: !self.turn }
            } else {
                Outcome::Stalemate
            }
        } else if self.is_insufficient_material() {
            Outcome::Draw(DrawReason::InsufficientMaterial)
        } else if self.halfmoves >= 150 {
            Outcome::Draw(DrawReason::SeventyFiveMoves)
        } else {
            Outcome::Ongoing
        }
    }

    fn gen_pawn_moves(&self, target: Bitboard, moves: &mut MoveList) {
        let turn = self.turn;
        let pawns = self.our(PieceType::Pawn);

        for from in pawns {
            for to in attacks::pawn_attacks(turn, from) & self.them() & target {
                self.push_pawn(from, to, moves);
            }
        }

        let single = pawns.relative_shift(turn, 8) & !self.board.occupied();
        let double = (single & Bitboard::relative_rank(turn, Rank::Third)).relative_shift(turn, 8)
            & !self.board.occupied();

        for to in single & target {
            if let Some(from) = to.offset(turn.fold(-8, 8)) {
                self.push_pawn(from, to, moves);
            }
        }
        for to in double & target {
            if let Some(from) = to.offset(turn.fold(-16, 16)) {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn push_pawn(&self, from: Square, to: Square, moves: &mut MoveList) {
        if to.rank() == (!self.turn).backrank() {
            for promotion in PieceType::PROMOTIONS {
                moves.push(Move::promotion(from, to, promotion));
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }

    fn gen_piece_moves(&self, target: Bitboard, moves: &mut MoveList) {
        let occupied = self.board.occupied();

        for from in self.our(PieceType::Knight) {
            for to in attacks::knight_attacks(from) & target {
                moves.push(Move::new(from, to));
            }
        }
        for from in self.our(PieceType::Bishop) {
            for to in attacks::bishop_attacks(from, occupied) & target {
                moves.push(Move::new(from, to));
            }
        }
        for from in self.our(PieceType::Rook) {
            for to in attacks::rook_attacks(from, occupied) & target {
                moves.push(Move::new(from, to));
            }
        }
        for from in self.our(PieceType::Queen) {
            for to in attacks::queen_attacks(from, occupied) & target {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn gen_king_moves(&self, king: Square, target: Bitboard, moves: &mut MoveList) {
        for to in attacks::king_attacks(king) & target {
            moves.push(Move::new(king, to));
        }
    }

    fn gen_castling_moves(&self, moves: &mut MoveList) {
        let turn = self.turn;
        for side in CastlingSide::ALL {
            if !self.castling.has(turn, side) {
                continue;
            }
            if (side.empty_path(turn) & self.board.occupied()).any() {
                continue;
            }
            if side.king_path(turn).all(|sq| {
                self.board
                    .attacks_to(sq, !turn, self.board.occupied())
                    .is_empty()
            }) {
                moves.push(Move::castle(turn, side));
            }
        }
    }

    fn gen_en_passant(&self, moves: &mut MoveList) {
        if let Some(ep) = self.ep_square {
            for from in self.our(PieceType::Pawn) & attacks::pawn_attacks(!self.turn, ep) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }

    fn gen_evasions(&self, king: Square, checkers: Bitboard, moves: &mut MoveList) {
        self.gen_king_moves(king, !self.us(), moves);

        if let Some(checker) = checkers.single_square() {
            let target = attacks::between(king, checker).with(checker);
            self.gen_pawn_moves(target, moves);
            self.gen_piece_moves(target, moves);
            self.gen_en_passant(moves);
        }
    }

    /// Pieces that stand between the king and an enemy slider that would
    /// otherwise attack it. Moving such a piece off the shared line
    /// exposes the king.
    fn slider_blockers(&self, king: Square) -> Bitboard {
        let snipers = self.them()
            & ((attacks::rook_attacks(king, Bitboard::EMPTY) & self.board.rooks_and_queens())
                | (attacks::bishop_attacks(king, Bitboard::EMPTY)
                    & self.board.bishops_and_queens()));

        let mut blockers = Bitboard::EMPTY;
        for sniper in snipers {
            let b = attacks::between(king, sniper) & self.board.occupied();
            if !b.more_than_one() {
                blockers |= b;
            }
        }
        blockers
    }

    /// The final legality filter over pseudo-legal moves. Castling paths
    /// are already verified during generation.
    fn is_safe(&self, king: Square, m: Move, blockers: Bitboard) -> bool {
        if m.is_castle() {
            return true;
        }

        if m.is_en_passant() {
            // Both the capturing and the captured pawn leave their
            // squares, so recompute the full attack set on the adjusted
            // occupancy.
            let captured = Square::from_coords(m.to.file(), m.from.rank());
            let occupied = self
                .board
                .occupied()
                .without(m.from)
                .without(captured)
                .with(m.to);
            return (self.board.attacks_to(king, !self.turn, occupied)
                & !Bitboard::from_square(captured))
            .is_empty();
        }

        if m.from == king {
            return self
                .board
                .attacks_to(m.to, !self.turn, self.board.occupied().without(king))
                .is_empty();
        }

        !blockers.contains(m.from) || attacks::aligned(m.from, m.to, king)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveFlags;

    fn play_all(position: &mut Position, moves: &[(Square, Square)]) {
        for &(from, to) in moves {
            position
                .play(Move::new(from, to))
                .expect("legal test move");
        }
    }

    #[test]
    fn test_starting_moves() {
        let position = Position::new();
        assert_eq!(position.legal_moves().len(), 20);
        assert!(!position.is_check());
        assert_eq!(position.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_fools_mate() {
        let mut position = Position::new();
        play_all(
            &mut position,
            &[
                (Square::G2, Square::G4),
                (Square::E7, Square::E5),
                (Square::F2, Square::F3),
                (Square::D8, Square::H4),
            ],
        );
        assert!(position.is_checkmate());
        assert_eq!(
            position.outcome(),
            Outcome::Checkmate {
                winner: Color::Black
            }
        );
    }

    #[test]
    fn test_play_and_undo() {
        let mut position = Position::new();
        let before = position.clone();
        let m = Move::new(Square::E2, Square::E4);
        let undo = position.play(m).expect("e4 is legal");
        assert_eq!(position.ep_square(), Some(Square::E3));
        assert_eq!(position.turn(), Color::Black);

        position.undo_unchecked(m, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_undo_capture_and_promotion() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::H8, Color::Black.king());
        board.set_piece_at(Square::B7, Color::White.pawn());
        board.set_piece_at(Square::A8, Color::Black.rook());
        let mut position = Position::from_parts(
            board,
            Color::White,
            CastlingRights::empty(),
            None,
            3,
            NonZeroU32::MIN,
        )
        .expect("valid setup");
        let before = position.clone();

        let m = Move::promotion(Square::B7, Square::A8, PieceType::Queen);
        let undo = position.play(m).expect("promotion capture is legal");
        assert_eq!(
            position.board().piece_at(Square::A8),
            Some(Color::White.queen())
        );
        assert_eq!(position.halfmoves(), 0);

        position.undo_unchecked(m, undo);
        assert_eq!(position, before);
    }

    #[test]
    fn test_en_passant_only_immediately() {
        let mut position = Position::new();
        play_all(
            &mut position,
            &[
                (Square::E2, Square::E4),
                (Square::A7, Square::A6),
                (Square::E4, Square::E5),
                (Square::D7, Square::D5),
            ],
        );
        assert_eq!(position.ep_square(), Some(Square::D6));
        let ep = Move::en_passant(Square::E5, Square::D6);
        assert!(position.is_legal(ep));

        // Any other move forfeits the capture.
        play_all(
            &mut position,
            &[(Square::B1, Square::C3), (Square::A6, Square::A5)],
        );
        assert_eq!(position.ep_square(), None);
        assert!(!position.is_legal(ep));
    }

    #[test]
    fn test_pinned_pieces() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::C3, Color::White.knight());
        board.set_piece_at(Square::E4, Color::White.rook());
        board.set_piece_at(Square::A5, Color::Black.bishop());
        board.set_piece_at(Square::E8, Color::Black.rook());
        board.set_piece_at(Square::H8, Color::Black.king());
        let position = Position::from_parts(
            board,
            Color::White,
            CastlingRights::empty(),
            None,
            0,
            NonZeroU32::MIN,
        )
        .expect("valid setup");

        // The knight is pinned on the a5-e1 diagonal and cannot move at
        // all. The rook is pinned on the e-file but may slide along it.
        assert!(!position.is_legal(Move::new(Square::C3, Square::D5)));
        assert!(!position.is_legal(Move::new(Square::C3, Square::B5)));
        assert!(!position.is_legal(Move::new(Square::E4, Square::A4)));
        assert!(position.is_legal(Move::new(Square::E4, Square::E6)));
        assert!(position.is_legal(Move::new(Square::E4, Square::E8)));
    }

    #[test]
    fn test_castling() {
        let mut position = Position::new();
        play_all(
            &mut position,
            &[
                (Square::E2, Square::E4),
                (Square::E7, Square::E5),
                (Square::G1, Square::F3),
                (Square::B8, Square::C6),
                (Square::F1, Square::C4),
                (Square::G8, Square::F6),
            ],
        );
        let castle = Move::castle(Color::White, CastlingSide::KingSide);
        assert!(position.is_legal(castle));

        position.play_unchecked(castle);
        assert_eq!(
            position.board().piece_at(Square::G1),
            Some(Color::White.king())
        );
        assert_eq!(
            position.board().piece_at(Square::F1),
            Some(Color::White.rook())
        );
        assert!(!position.castling().has(Color::White, CastlingSide::KingSide));
        assert!(!position.castling().has(Color::White, CastlingSide::QueenSide));
        assert!(position.castling().has(Color::Black, CastlingSide::KingSide));
    }

    #[test]
    fn test_castling_rights_are_permanent() {
        let mut position = Position::new();
        play_all(
            &mut position,
            &[
                (Square::E2, Square::E4),
                (Square::E7, Square::E5),
                (Square::E1, Square::E2),
                (Square::G8, Square::F6),
                (Square::E2, Square::E1),
                (Square::F6, Square::G8),
            ],
        );
        // King returned home, but the rights are gone for good.
        assert!(!position.castling().has(Color::White, CastlingSide::KingSide));
        assert!(!position
            .is_legal(Move::castle(Color::White, CastlingSide::KingSide)));
    }

    #[test]
    fn test_validation() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        assert_eq!(
            Position::from_parts(
                board,
                Color::White,
                CastlingRights::empty(),
                None,
                0,
                NonZeroU32::MIN,
            ),
            Err(PositionError::MissingKing)
        );

        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::A1, Color::White.pawn());
        assert_eq!(
            Position::from_parts(
                board,
                Color::White,
                CastlingRights::empty(),
                None,
                0,
                NonZeroU32::MIN,
            ),
            Err(PositionError::PawnsOnBackrank)
        );

        board.discard_piece_at(Square::A1);
        assert_eq!(
            Position::from_parts(
                board,
                Color::White,
                CastlingRights::WHITE_KING_SIDE,
                None,
                0,
                NonZeroU32::MIN,
            ),
            Err(PositionError::InvalidCastlingRights)
        );
    }

    #[test]
    fn test_insufficient_material() {
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::C1, Color::White.bishop());
        let position = Position::from_parts(
            board,
            Color::White,
            CastlingRights::empty(),
            None,
            0,
            NonZeroU32::MIN,
        )
        .expect("valid setup");
        assert!(position.is_insufficient_material());

        // Same colored bishops on both sides.
        board.set_piece_at(Square::F8, Color::Black.bishop());
        let position = Position::from_parts(
            board,
            Color::White,
            CastlingRights::empty(),
            None,
            0,
            NonZeroU32::MIN,
        )
        .expect("valid setup");
        assert!(position.is_insufficient_material());

        // Two knights do not qualify.
        let mut board = Board::empty();
        board.set_piece_at(Square::E1, Color::White.king());
        board.set_piece_at(Square::E8, Color::Black.king());
        board.set_piece_at(Square::B1, Color::White.knight());
        board.set_piece_at(Square::G1, Color::White.knight());
        let position = Position::from_parts(
            board,
            Color::White,
            CastlingRights::empty(),
            None,
            0,
            NonZeroU32::MIN,
        )
        .expect("valid setup");
        assert!(!position.is_insufficient_material());
    }

    #[test]
    fn test_en_passant_discovers_nothing() {
        // Classic trap: both pawns leave the fifth rank and a rook
        // suddenly sees the king.
        let mut board = Board::empty();
        board.set_piece_at(Square::A5, Color::White.king());
        board.set_piece_at(Square::E5, Color::White.pawn());
        board.set_piece_at(Square::D7, Color::Black.pawn());
        board.set_piece_at(Square::H5, Color::Black.rook());
        board.set_piece_at(Square::H8, Color::Black.king());
        let mut position = Position::from_parts(
            board,
            Color::Black,
            CastlingRights::empty(),
            None,
            0,
            NonZeroU32::MIN,
        )
        .expect("valid setup");

        position.play_unchecked(Move::new(Square::D7, Square::D5));
        assert_eq!(position.ep_square(), Some(Square::D6));
        assert!(!position.is_legal(Move::en_passant(Square::E5, Square::D6)));
        assert_eq!(position.legal_ep_square(), None);
    }

    #[test]
    fn test_move_flags_are_checked() {
        let mut position = Position::new();
        play_all(
            &mut position,
            &[(Square::E2, Square::E4), (Square::E7, Square::E5)],
        );
        // A plain king slide to g1 is not castling.
        let fake = Move {
            from: Square::E1,
            to: Square::G1,
            promotion: None,
            flags: MoveFlags::empty(),
        };
        assert!(!position.is_legal(fake));
    }
}
