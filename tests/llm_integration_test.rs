//! Integration tests for LLM provider connectivity.

use othello_challenge::{
    AgentConfig, ApiKeys, Difficulty, LlmClient, LlmProposer, LlmProvider, MoveProposer,
    ProposalRequest,
};
use strictly_othello::proposal::extract_coord;
use strictly_othello::{GameMode, GameState};
use tracing::instrument;

async fn propose_opening(provider: LlmProvider) {
    dotenvy::dotenv().ok();

    let keys = ApiKeys::from_env();
    let config = AgentConfig::new("Agent".to_string()).with_provider(provider);
    let llm_config = config
        .create_llm_config(&keys)
        .expect("API key not set");
    let proposer = LlmProposer::new("Agent".to_string(), LlmClient::new(llm_config), Difficulty::Hard);

    let game = GameState::new(GameMode::HumanVsAgent);
    let raw = proposer
        .propose(&ProposalRequest::retry(&game))
        .await
        .expect("Failed to generate");

    eprintln!("Response: {}", raw);
    assert!(!raw.is_empty(), "Response should not be empty");
    assert!(extract_coord(game.board(), &raw).is_some() || raw == "PASS");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_connectivity() {
    propose_opening(LlmProvider::OpenAI).await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    propose_opening(LlmProvider::Anthropic).await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_gemini_connectivity() {
    propose_opening(LlmProvider::Gemini).await;
}
