//! Scoring and terminal-state detection.

use super::legality::valid_moves;
use crate::types::{Board, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Result of a finished game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Strict majority of discs.
    #[display("{} wins", _0)]
    Winner(Player),
    /// Equal disc counts.
    #[display("Draw")]
    Draw,
}

impl Outcome {
    /// Decides the outcome from disc counts.
    pub fn from_score(black: usize, white: usize) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Player::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Player::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

/// Disc counts as `(black, white)`.
pub fn score(board: &Board) -> (usize, usize) {
    (board.count(Player::Black), board.count(Player::White))
}

/// True when neither player has a legal move anywhere.
#[instrument(skip(board))]
pub fn is_game_over(board: &Board) -> bool {
    Player::iter().all(|player| valid_moves(board, player).is_empty())
}

/// The outcome if the board is terminal, `None` while play continues.
pub fn outcome(board: &Board) -> Option<Outcome> {
    if !is_game_over(board) {
        return None;
    }
    let (black, white) = score(board);
    Some(Outcome::from_score(black, white))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_is_not_over() {
        assert!(!is_game_over(&Board::standard()));
        assert_eq!(outcome(&Board::standard()), None);
    }

    #[test]
    fn test_full_board_majority_wins() {
        let board = Board::from_rows(&["BBBB", "BBBB", "WWWW", "WWWB"]).unwrap();
        assert_eq!(outcome(&board), Some(Outcome::Winner(Player::Black)));
    }

    #[test]
    fn test_stalemate_with_empty_cells_is_draw() {
        // Nobody can bracket anything, although cells remain empty.
        let board = Board::from_rows(&["B..W", "....", "....", "W..B"]).unwrap();
        assert!(is_game_over(&board));
        assert_eq!(outcome(&board), Some(Outcome::Draw));
    }

    #[test]
    fn test_single_color_board_is_over() {
        let board = Board::from_rows(&["W...", "....", "....", "...."]).unwrap();
        assert_eq!(outcome(&board), Some(Outcome::Winner(Player::White)));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Winner(Player::White).to_string(), "White wins");
        assert_eq!(Outcome::Draw.to_string(), "Draw");
    }
}
