//! First-class action types for Othello.
//!
//! Moves are domain events, not side effects. They record who placed a disc
//! where and can be logged, serialized or replayed.

use crate::types::{Coord, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A placement: a player putting a disc on a coordinate.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{} -> {}", player, coord)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// Where the disc goes.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: Player, coord: Coord) -> Self {
        Self { player, coord }
    }
}

/// Why an attempted move was rejected. The game state is never changed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The game already has an outcome.
    #[display("Game is already over")]
    GameOver,

    /// The coordinate is not on the board.
    #[display("{} is off the board", _0)]
    OutOfBounds(Coord),

    /// The coordinate is on the board but captures nothing (or is occupied).
    #[display("{} is not a legal move for {}", _1, _0)]
    Illegal(Player, Coord),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
