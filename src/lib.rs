//! Othello Challenge - play Othello against a human or an LLM agent.
//!
//! The rules live in [`strictly_othello`]; this crate adds everything around
//! them.
//!
//! # Architecture
//!
//! - **Config**: agent settings (TOML) and API keys (environment or JSON)
//! - **LLM client**: OpenAI, Anthropic and Gemini behind one `generate` call
//! - **Proposers**: untrusted sources of free-text move suggestions
//! - **Participants**: humans, LLM agents and random movers
//! - **Orchestrator**: the turn loop, re-validating every move
//!
//! # Example
//!
//! ```no_run
//! use othello_challenge::{AgentConfig, ApiKeys, LlmClient, LlmProvider};
//!
//! # fn example() -> anyhow::Result<()> {
//! let keys = ApiKeys::from_env();
//! let config = AgentConfig::new("Agent".to_string()).with_provider(LlmProvider::Gemini);
//! let _client = LlmClient::new(config.create_llm_config(&keys)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod agent_config;
pub mod llm_client;
pub mod orchestrator;
pub mod players;
pub mod prompt;
pub mod proposer;

// Crate-level exports - Agent configuration
pub use agent_config::{AgentConfig, ApiKeys, ConfigError, Difficulty};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider, ProviderConfig};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, MoveLog, Orchestrator, outcome_text};

// Crate-level exports - Participants
pub use players::{
    AgentPlayer, Choice, HumanPlayer, Participant, Provenance, RandomPlayer,
};

// Crate-level exports - Proposals
pub use proposer::{LlmProposer, MoveProposer, ProposalError, ProposalRequest};
