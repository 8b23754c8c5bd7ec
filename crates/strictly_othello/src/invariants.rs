//! First-class invariants for Othello.
//!
//! Invariants are logical properties that must hold for every reachable
//! [`GameState`]. They are checked after each transition in debug builds and
//! can be tested independently.

use crate::action::MoveError;
use crate::game::GameState;
use crate::rules::{self, Outcome};
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
            (I4::holds(state), I4::description()),
        ];
        let violations: Vec<_> = checks
            .into_iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Board is square and keeps its opening size.
pub struct SquareGrid;

impl Invariant<GameState> for SquareGrid {
    fn holds(state: &GameState) -> bool {
        let board = state.board();
        board.cells().len() == board.size() * board.size()
    }

    fn description() -> &'static str {
        "Board must be a square grid"
    }
}

/// Each placement adds exactly one disc; flips never create or remove discs.
pub struct DiscConservation;

impl Invariant<GameState> for DiscConservation {
    fn holds(state: &GameState) -> bool {
        let expected = state.opening_discs() + state.history().len();
        let actual = state.board().disc_count();
        if expected != actual {
            warn!(expected, actual, "Disc conservation violated");
        }
        expected == actual
    }

    fn description() -> &'static str {
        "Disc count must equal opening discs plus moves played"
    }
}

/// While the game runs, the side to move has at least one legal move.
pub struct SideToMoveCanPlay;

impl Invariant<GameState> for SideToMoveCanPlay {
    fn holds(state: &GameState) -> bool {
        state.is_over() || !state.legal_moves().is_empty()
    }

    fn description() -> &'static str {
        "Player to move must have a legal move while the game is in progress"
    }
}

/// A recorded outcome matches the board: terminal and decided by majority.
pub struct OutcomeMatchesScore;

impl Invariant<GameState> for OutcomeMatchesScore {
    fn holds(state: &GameState) -> bool {
        match state.outcome() {
            None => !rules::is_game_over(state.board()),
            Some(outcome) => {
                let (black, white) = state.score();
                rules::is_game_over(state.board()) && outcome == Outcome::from_score(black, white)
            }
        }
    }

    fn description() -> &'static str {
        "Outcome must be present exactly when no one can move, and match the score"
    }
}

/// Every invariant a game state must satisfy.
pub type OthelloInvariants = (
    SquareGrid,
    DiscConservation,
    SideToMoveCanPlay,
    OutcomeMatchesScore,
);

/// Checks [`OthelloInvariants`], folding violations into a [`MoveError`].
#[instrument(skip(state))]
pub fn verify(state: &GameState) -> Result<(), MoveError> {
    OthelloInvariants::check_all(state).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameMode;
    use crate::types::{Board, Coord, Player};

    #[test]
    fn test_opening_satisfies_all() {
        assert!(verify(&GameState::new(GameMode::HumanVsHuman)).is_ok());
    }

    #[test]
    fn test_after_moves_satisfies_all() {
        let moves = [Coord::new(2, 3), Coord::new(2, 2), Coord::new(2, 1)];
        let game = GameState::replay(GameMode::HumanVsHuman, &moves).unwrap();
        assert!(verify(&game).is_ok());
    }

    #[test]
    fn test_terminal_position_satisfies_all() {
        let board = Board::from_rows(&["B..W", "....", "....", "W..B"]).unwrap();
        let game = GameState::from_position(board, Player::Black, GameMode::HumanVsHuman);
        assert!(game.is_over());
        assert!(verify(&game).is_ok());
    }

    #[test]
    fn test_conservation_detects_tampering() {
        let game = GameState::new(GameMode::HumanVsHuman);
        let mut json: serde_json::Value = serde_json::to_value(&game).unwrap();
        json["opening_discs"] = serde_json::json!(5);
        let tampered: GameState = serde_json::from_value(json).unwrap();
        assert!(!DiscConservation::holds(&tampered));
        assert!(matches!(
            verify(&tampered),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
