//! Participants that choose moves for one side of the board.

mod agent;
mod human;
mod random;

pub use agent::AgentPlayer;
pub use human::HumanPlayer;
pub use random::RandomPlayer;

use anyhow::Result;
use derive_more::Display;
use strictly_othello::{Coord, GameState};

/// How a participant arrived at its move.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Chosen directly.
    #[display("")]
    Direct,
    /// Accepted on the retry that listed the legal moves.
    #[display(" (retry)")]
    Retry,
    /// Picked at random after the proposals failed.
    #[display(" (quick choose)")]
    Fallback,
}

/// A move and how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Choice {
    /// Chosen coordinate.
    pub coord: Coord,
    /// How it was chosen.
    pub provenance: Provenance,
}

/// Trait for participants that can make moves.
#[async_trait::async_trait]
pub trait Participant: Send {
    /// Chooses a move for the side to move in `game`.
    ///
    /// The orchestrator re-validates the result, so a participant may
    /// return an illegal move and be asked again.
    async fn choose_move(&mut self, game: &GameState) -> Result<Choice>;

    /// Returns the participant's display name.
    fn name(&self) -> &str;

    /// Whether moves come from an automated agent.
    fn is_agent(&self) -> bool {
        false
    }
}
