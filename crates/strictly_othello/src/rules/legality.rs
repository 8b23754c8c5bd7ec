//! Move legality: capture detection along the eight compass rays.

use crate::types::{Board, Cell, Coord, Player};
use tracing::instrument;

/// The eight compass directions as (row, column) steps.
#[rustfmt::skip]
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Returns the opponent discs captured if `player` plays at `mv`.
///
/// Empty when the target is off-board, occupied, or brackets nothing.
/// Captures are grouped by direction in [`DIRECTIONS`] order, nearest first.
#[instrument(skip(board), fields(size = board.size()))]
pub fn flips_for(board: &Board, player: Player, mv: Coord) -> Vec<Coord> {
    if !board.is_empty(mv) {
        return Vec::new();
    }

    let opponent = Cell::Disc(player.opponent());
    let own = Cell::Disc(player);
    let mut flips = Vec::new();

    for dir in DIRECTIONS {
        let mut line = Vec::new();
        let mut cursor = mv.step(dir, board.size());
        while let Some(pos) = cursor
            && board.get(pos) == Some(opponent)
        {
            line.push(pos);
            cursor = pos.step(dir, board.size());
        }
        let bracketed = cursor.and_then(|pos| board.get(pos)) == Some(own);
        if bracketed && !line.is_empty() {
            flips.extend(line);
        }
    }

    flips
}

/// Checks whether `player` may legally play at `mv`.
pub fn can_play(board: &Board, player: Player, mv: Coord) -> bool {
    !flips_for(board, player, mv).is_empty()
}

/// All legal moves for `player`, scanned row-major.
#[instrument(skip(board), fields(size = board.size()))]
pub fn valid_moves(board: &Board, player: Player) -> Vec<Coord> {
    board
        .coords()
        .filter(|&coord| can_play(board, player, coord))
        .collect()
}
