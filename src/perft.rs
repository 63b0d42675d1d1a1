use crate::{
    moves::Move,
    position::Position,
};

/// Counts all leaf nodes of the legal move tree up to the given depth.
///
/// Useful to validate move generation, since reference results are
/// published for many positions. Moves are played and taken back on the
/// given position, which is left exactly as it was.
///
/// ```
/// use shatranj::{perft, Position};
///
/// let mut position = Position::new();
/// assert_eq!(perft(&mut position, 1), 20);
/// assert_eq!(perft(&mut position, 2), 400);
/// ```
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = position.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|&m| {
                    let undo = position.play_unchecked(m);
                    let nodes = perft(position, depth - 1);
                    position.undo_unchecked(m, undo);
                    nodes
                })
                .sum()
        }
    }
}

/// Like [`perft`], but split by first move. Handy to compare against
/// another move generator when hunting down a disagreement.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    position
        .legal_moves()
        .iter()
        .map(|&m| {
            let undo = position.play_unchecked(m);
            let nodes = perft(position, depth.saturating_sub(1));
            position.undo_unchecked(m, undo);
            (m, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let mut position = Position::new();
        assert_eq!(perft(&mut position, 0), 1);
        assert_eq!(perft(&mut position, 1), 20);
        assert_eq!(perft(&mut position, 2), 400);
        assert_eq!(perft(&mut position, 3), 8902);
        assert_eq!(position, Position::new());
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut position = Position::new();
        let total: u64 = perft_divide(&mut position, 3).iter().map(|(_, n)| n).sum();
        assert_eq!(total, 8902);
    }
}
