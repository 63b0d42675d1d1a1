//! Attack and ray lookup tables.
//!
//! All tables are filled at compile time. Sliding piece attacks use the
//! classical approach: for each of the eight directions, take the
//! unobstructed ray from the square, find the first blocker on it, and
//! remove everything behind the blocker.

use crate::{
    bitboard::Bitboard,
    color::Color,
    piece::{Piece, PieceType},
    square::Square,
};

/// Walks each delta from `square` until leaving the board or hitting
/// `occupied`, collecting the visited squares. With `occupied` set to all
/// squares this yields single-step attacks.
const fn sliding_attacks(square: i32, occupied: u64, deltas: &[i32]) -> u64 {
    let mut attack = 0;

    let mut i = 0;
    let len = deltas.len();
    while i < len {
        let mut previous = square;
        loop {
            let sq = previous + deltas[i];
            let file_diff = (sq & 0x7) - (previous & 0x7);
            if sq < 0 || sq > 63 || file_diff > 2 || file_diff < -2 {
                break;
            }

            let bb = 1 << sq;
            attack |= bb;
            if occupied & bb != 0 {
                break;
            }

            previous = sq;
        }
        i += 1;
    }

    attack
}

const fn stepping_attacks(deltas: &[i32]) -> [u64; 64] {
    let mut table = [0; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = sliding_attacks(sq as i32, !0, deltas);
        sq += 1;
    }
    table
}

const KNIGHT_ATTACKS: [u64; 64] = stepping_attacks(&[17, 15, 10, 6, -17, -15, -10, -6]);
const KING_ATTACKS: [u64; 64] = stepping_attacks(&[9, 8, 7, 1, -9, -8, -7, -1]);
const WHITE_PAWN_ATTACKS: [u64; 64] = stepping_attacks(&[7, 9]);
const BLACK_PAWN_ATTACKS: [u64; 64] = stepping_attacks(&[-7, -9]);

/// Deltas of the eight ray directions. Directions `i` and `(i + 4) & 7`
/// are opposites, and the first four run towards higher square indexes.
const DIRECTION_DELTAS: [i32; 8] = [9, 8, 7, 1, -9, -8, -7, -1];

const DIAGONAL_DIRECTIONS: [usize; 4] = [0, 2, 4, 6];
const STRAIGHT_DIRECTIONS: [usize; 4] = [1, 3, 5, 7];

/// Unobstructed rays, indexed by direction and then square. A ray does not
/// include its origin square.
const RAYS: [[u64; 64]; 8] = {
    let mut table = [[0; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let mut sq = 0;
        while sq < 64 {
            table[dir][sq] = sliding_attacks(sq as i32, 0, &[DIRECTION_DELTAS[dir]]);
            sq += 1;
        }
        dir += 1;
    }
    table
};

/// Squares strictly between two aligned squares, or empty.
static BETWEEN: [[u64; 64]; 64] = {
    let mut table = [[0; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let ray = RAYS[dir][a];
            let mut b = 0;
            while b < 64 {
                if ray & (1 << b) != 0 {
                    table[a][b] = ray & RAYS[(dir + 4) & 7][b];
                }
                b += 1;
            }
            dir += 1;
        }
        a += 1;
    }
    table
};

/// The full line through two aligned squares, including both, or empty.
static LINE: [[u64; 64]; 64] = {
    let mut table = [[0; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut dir = 0;
        while dir < 8 {
            let ray = RAYS[dir][a];
            let line = ray | RAYS[(dir + 4) & 7][a] | (1 << a);
            let mut b = 0;
            while b < 64 {
                if ray & (1 << b) != 0 {
                    table[a][b] = line;
                }
                b += 1;
            }
            dir += 1;
        }
        a += 1;
    }
    table
};

/// The ray in one direction from `sq`, cut off behind the first square of
/// `occupied` on it. The blocker itself is included.
#[inline]
fn blocked_ray(dir: usize, sq: Square, occupied: Bitboard) -> Bitboard {
    let ray = Bitboard(RAYS[dir][sq.to_usize()]);
    let blocker = if DIRECTION_DELTAS[dir] > 0 {
        (ray & occupied).first()
    } else {
        (ray & occupied).last()
    };
    match blocker {
        Some(blocker) => ray ^ Bitboard(RAYS[dir][blocker.to_usize()]),
        None => ray,
    }
}

/// Squares attacked by a pawn of the given color.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(match color {
        Color::White => WHITE_PAWN_ATTACKS[sq.to_usize()],
        Color::Black => BLACK_PAWN_ATTACKS[sq.to_usize()],
    })
}

/// Squares attacked by a knight.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.to_usize()])
}

/// Squares attacked by a king.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.to_usize()])
}

/// Squares attacked by a bishop on `sq`, given `occupied` squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let mut attack = Bitboard::EMPTY;
    for dir in DIAGONAL_DIRECTIONS {
        attack |= blocked_ray(dir, sq, occupied);
    }
    attack
}

/// Squares attacked by a rook on `sq`, given `occupied` squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    let mut attack = Bitboard::EMPTY;
    for dir in STRAIGHT_DIRECTIONS {
        attack |= blocked_ray(dir, sq, occupied);
    }
    attack
}

/// Squares attacked by a queen on `sq`, given `occupied` squares.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Squares attacked by `piece` on `sq`, given `occupied` squares.
pub fn attacks(sq: Square, piece: Piece, occupied: Bitboard) -> Bitboard {
    match piece.piece_type {
        PieceType::Pawn => pawn_attacks(piece.color, sq),
        PieceType::Knight => knight_attacks(sq),
        PieceType::Bishop => bishop_attacks(sq, occupied),
        PieceType::Rook => rook_attacks(sq, occupied),
        PieceType::Queen => queen_attacks(sq, occupied),
        PieceType::King => king_attacks(sq),
    }
}

/// The rank, file or diagonal through `a` and `b`, including both, if they
/// are aligned.
///
/// ```
/// use shatranj::{attacks, Square};
///
/// let line = attacks::ray(Square::E2, Square::G4);
/// assert!(line.contains(Square::D1));
/// assert!(line.contains(Square::H5));
/// ```
#[inline]
pub fn ray(a: Square, b: Square) -> Bitboard {
    Bitboard(LINE[a.to_usize()][b.to_usize()])
}

/// The squares strictly between `a` and `b`, if they are aligned.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    Bitboard(BETWEEN[a.to_usize()][b.to_usize()])
}

/// Tests if three squares share a rank, file or diagonal.
#[inline]
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    ray(a, b).contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_attacks() {
        assert_eq!(
            knight_attacks(Square::A1),
            Bitboard::from_square(Square::B3).with(Square::C2)
        );
        assert_eq!(king_attacks(Square::E4).count(), 8);
        assert_eq!(
            pawn_attacks(Color::White, Square::E4),
            Bitboard::from_square(Square::D5).with(Square::F5)
        );
        assert_eq!(
            pawn_attacks(Color::Black, Square::A5),
            Bitboard::from_square(Square::B4)
        );
    }

    #[test]
    fn test_rook_attacks() {
        assert_eq!(
            rook_attacks(Square::D6, Bitboard::from_square(Square::H6)),
            Bitboard(0x0808_f708_0808_0808)
        );
        // Empty board from a corner.
        assert_eq!(rook_attacks(Square::A1, Bitboard::EMPTY).count(), 14);
    }

    #[test]
    fn test_bishop_attacks() {
        let occupied = Bitboard::from_square(Square::B2).with(Square::F6);
        let attack = bishop_attacks(Square::D4, occupied);
        assert!(attack.contains(Square::B2));
        assert!(attack.contains(Square::F6));
        assert!(!attack.contains(Square::A1));
        assert!(!attack.contains(Square::G7));
    }

    #[test]
    fn test_queen_attacks() {
        assert_eq!(queen_attacks(Square::D4, Bitboard::EMPTY).count(), 27);
    }

    #[test]
    fn test_between() {
        assert_eq!(
            between(Square::A1, Square::A4),
            Bitboard::from_square(Square::A2).with(Square::A3)
        );
        assert_eq!(between(Square::A1, Square::B2), Bitboard::EMPTY);
        assert_eq!(between(Square::A1, Square::C2), Bitboard::EMPTY);
        assert_eq!(
            between(Square::H8, Square::E5),
            Bitboard::from_square(Square::F6).with(Square::G7)
        );
    }

    #[test]
    fn test_aligned() {
        assert!(aligned(Square::A1, Square::H8, Square::D4));
        assert!(aligned(Square::E2, Square::E4, Square::E8));
        assert!(!aligned(Square::A1, Square::H8, Square::E4));
    }
}
