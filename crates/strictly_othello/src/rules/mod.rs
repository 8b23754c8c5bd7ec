//! Game rules for Othello.
//!
//! Pure functions over [`Board`](crate::Board) values. Nothing here mutates
//! its input; move application returns a fresh board.

pub mod apply;
pub mod legality;
pub mod outcome;

pub use apply::apply_move;
pub use legality::{DIRECTIONS, can_play, flips_for, valid_moves};
pub use outcome::{Outcome, is_game_over, outcome, score};
