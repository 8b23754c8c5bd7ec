//! Agent participant: validated LLM proposals with retry and random fallback.

use super::{Choice, Participant, Provenance};
use crate::proposer::{MoveProposer, ProposalRequest};
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use strictly_othello::proposal::{extract_move, is_pass};
use strictly_othello::{Coord, GameState};
use tracing::{info, instrument, warn};

/// Agent that asks a [`MoveProposer`] for moves.
///
/// Each turn runs the same policy: one plain request, one retry that lists
/// the legal moves, then a uniformly random legal move. Proposal text is
/// validated against the position before it is accepted.
pub struct AgentPlayer {
    name: String,
    proposer: Box<dyn MoveProposer>,
    rng: StdRng,
}

impl AgentPlayer {
    /// Creates a new agent participant.
    pub fn new(name: impl Into<String>, proposer: Box<dyn MoveProposer>) -> Self {
        Self::with_rng(name, proposer, StdRng::from_os_rng())
    }

    /// Creates an agent participant with a fixed random source.
    pub fn with_rng(name: impl Into<String>, proposer: Box<dyn MoveProposer>, rng: StdRng) -> Self {
        Self {
            name: name.into(),
            proposer,
            rng,
        }
    }

    /// Asks once and validates the answer. Failures are logged, not raised.
    async fn attempt(&self, game: &GameState, request: &ProposalRequest) -> (Option<Coord>, String) {
        let raw = match self.proposer.propose(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Proposer failed");
                return (None, e.message);
            }
        };
        if is_pass(&raw) {
            warn!("Agent passed while legal moves exist");
        }
        let coord = extract_move(game.board(), game.current_player(), &raw);
        (coord, raw)
    }
}

#[async_trait::async_trait]
impl Participant for AgentPlayer {
    #[instrument(skip(self, game), fields(agent = %self.name, proposer = %self.proposer.name()))]
    async fn choose_move(&mut self, game: &GameState) -> Result<Choice> {
        let (first, raw) = self.attempt(game, &ProposalRequest::first(game)).await;
        if let Some(coord) = first {
            info!(%coord, "Proposal accepted");
            return Ok(Choice::new(coord, Provenance::Direct));
        }
        warn!(raw = %raw, "Invalid proposal, retrying with legal moves");

        let (second, raw_retry) = self.attempt(game, &ProposalRequest::retry(game)).await;
        if let Some(coord) = second {
            info!(%coord, "Retry accepted");
            return Ok(Choice::new(coord, Provenance::Retry));
        }

        let legal = game.legal_moves();
        let Some(&coord) = legal.choose(&mut self.rng) else {
            anyhow::bail!("No legal moves for {}", self.name);
        };
        warn!(raw = %raw, raw_retry = %raw_retry, %coord, "Proposals failed twice, choosing at random");
        Ok(Choice::new(coord, Provenance::Fallback))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_agent(&self) -> bool {
        true
    }
}
