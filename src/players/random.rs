//! Participant that plays uniformly random legal moves.

use super::{Choice, Participant, Provenance};
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use strictly_othello::GameState;
use tracing::{debug, instrument};

/// Random mover, for offline play and tests.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    /// Creates a new random participant.
    pub fn new(name: impl Into<String>) -> Self {
        Self::seeded(name, rand::random())
    }

    /// Creates a reproducible random participant.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait::async_trait]
impl Participant for RandomPlayer {
    #[instrument(skip(self, game), fields(participant = %self.name))]
    async fn choose_move(&mut self, game: &GameState) -> Result<Choice> {
        let legal = game.legal_moves();
        let Some(&coord) = legal.choose(&mut self.rng) else {
            anyhow::bail!("No valid moves available");
        };
        debug!(%coord, "Random move chosen");
        Ok(Choice::new(coord, Provenance::Direct))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_agent(&self) -> bool {
        true
    }
}
