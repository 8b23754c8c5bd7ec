//! Move application.

use super::legality::flips_for;
use crate::types::{Board, Coord, Player};
use tracing::{debug, instrument};

/// Places `player`'s disc at `mv` and flips every captured disc.
///
/// Returns a new board; the input is untouched. An illegal move yields an
/// unchanged copy, so callers must gate on [`can_play`](super::can_play)
/// to avoid silently dropping a turn.
#[instrument(skip(board), fields(size = board.size()))]
pub fn apply_move(board: &Board, player: Player, mv: Coord) -> Board {
    let flips = flips_for(board, player, mv);
    let mut next = board.clone();
    if flips.is_empty() {
        debug!("Move captures nothing, board unchanged");
        return next;
    }

    // flips_for only reports on-board coordinates.
    for coord in std::iter::once(mv).chain(flips.iter().copied()) {
        next.put(coord, player.to_cell());
    }
    debug!(flipped = flips.len(), "Move applied");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_apply_flips_single_disc() {
        let board = Board::standard();
        let next = apply_move(&board, Player::Black, Coord::new(2, 3));
        assert_eq!(next.get(Coord::new(2, 3)), Some(Cell::Disc(Player::Black)));
        assert_eq!(next.get(Coord::new(3, 3)), Some(Cell::Disc(Player::Black)));
        assert_eq!(next.count(Player::Black), 4);
        assert_eq!(next.count(Player::White), 1);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let board = Board::standard();
        let snapshot = board.clone();
        let _ = apply_move(&board, Player::Black, Coord::new(2, 3));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_illegal_move_is_noop() {
        let board = Board::standard();
        let next = apply_move(&board, Player::Black, Coord::new(0, 0));
        assert_eq!(next, board);
    }
}
