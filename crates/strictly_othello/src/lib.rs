//! Strictly Othello - pure rules engine for Othello (Reversi).
//!
//! Everything here is synchronous and free of I/O. Boards and game states
//! are values: operations take a reference and return a new value, so a
//! caller holding an older state never observes a change.
//!
//! # Example
//!
//! ```
//! use strictly_othello::{GameMode, GameState, TurnEvent, Player, parse_algebraic};
//!
//! let game = GameState::new(GameMode::HumanVsHuman);
//! let d3 = parse_algebraic("d3", game.board().size()).unwrap();
//! let transition = game.play(d3).unwrap();
//! assert_eq!(transition.event, TurnEvent::Continued { next: Player::White });
//! assert_eq!(transition.state.score(), (4, 1));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
pub mod invariants;
mod notation;
pub mod proposal;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{GameMode, GameState, Transition, TurnEvent};
pub use notation::{NotationError, parse_algebraic, to_algebraic};
pub use rules::{Outcome, apply_move, can_play, flips_for, is_game_over, score, valid_moves};
pub use types::{Board, BoardError, Cell, Coord, LETTERS, MAX_SIZE, Player, STANDARD_SIZE};
