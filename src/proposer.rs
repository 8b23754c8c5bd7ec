//! Move proposers: untrusted sources of free-text move suggestions.

use crate::agent_config::Difficulty;
use crate::llm_client::{LlmClient, LlmError};
use crate::prompt::{system_prompt, user_prompt};
use derive_more::{Display, Error};
use strictly_othello::{Board, Coord, GameState, Player};
use tracing::{debug, error, instrument};

/// What a proposer is asked to decide.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct ProposalRequest {
    /// Position to move in.
    pub board: Board,
    /// Side to move.
    pub player: Player,
    /// Legal moves, supplied on retry.
    pub legal_moves: Option<Vec<Coord>>,
}

impl ProposalRequest {
    /// First attempt: the position only.
    pub fn first(game: &GameState) -> Self {
        Self::new(game.board().clone(), game.current_player(), None)
    }

    /// Retry: the position plus the list of legal moves.
    pub fn retry(game: &GameState) -> Self {
        Self::new(
            game.board().clone(),
            game.current_player(),
            Some(game.legal_moves()),
        )
    }

    /// Whether this is a retry.
    pub fn is_retry(&self) -> bool {
        self.legal_moves.is_some()
    }
}

/// Source of free-text move proposals.
///
/// Output is never trusted; callers validate it against the rules.
#[async_trait::async_trait]
pub trait MoveProposer: Send + Sync {
    /// Returns raw text that should contain a coordinate or `PASS`.
    async fn propose(&self, request: &ProposalRequest) -> Result<String, ProposalError>;

    /// Display name for logs.
    fn name(&self) -> &str;
}

/// Proposer backed by an LLM.
#[derive(Debug, Clone)]
pub struct LlmProposer {
    name: String,
    client: LlmClient,
    difficulty: Difficulty,
}

impl LlmProposer {
    /// Creates a new LLM proposer.
    #[instrument(skip(client))]
    pub fn new(name: String, client: LlmClient, difficulty: Difficulty) -> Self {
        Self {
            name,
            client,
            difficulty,
        }
    }
}

#[async_trait::async_trait]
impl MoveProposer for LlmProposer {
    #[instrument(skip(self, request), fields(proposer = %self.name, retry = request.is_retry()))]
    async fn propose(&self, request: &ProposalRequest) -> Result<String, ProposalError> {
        let system = system_prompt(self.difficulty, request.board.size(), request.is_retry());
        let user = user_prompt(&request.board, request.player, request.legal_moves.as_deref());
        debug!(user_prompt = %user, "Requesting proposal");

        let raw = self.client.generate(&system, &user).await?;
        debug!(raw = %raw, "Proposal received");
        Ok(raw)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Proposal error.
#[derive(Debug, Clone, Display, Error)]
#[display("Proposal error: {} at {}:{}", message, file, line)]
pub struct ProposalError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProposalError {
    /// Creates a new proposal error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "Proposal error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<LlmError> for ProposalError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        Self::new(err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_othello::GameMode;

    #[test]
    fn test_retry_request_carries_legal_moves() {
        let game = GameState::new(GameMode::HumanVsAgent);
        assert!(!ProposalRequest::first(&game).is_retry());

        let retry = ProposalRequest::retry(&game);
        assert_eq!(retry.legal_moves.as_ref().map(Vec::len), Some(4));
        assert_eq!(retry.player, Player::Black);
    }
}
