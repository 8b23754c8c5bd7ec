//! Othello Challenge - terminal front end.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use othello_challenge::{
    AgentConfig, AgentPlayer, ApiKeys, Difficulty, GameEvent, HumanPlayer, LlmClient,
    LlmProposer, LlmProvider, Orchestrator, Participant, Provenance,
};
use std::path::PathBuf;
use strictly_othello::{GameMode, GameState};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            size,
            config,
            keys,
            provider,
            model,
            difficulty,
        } => {
            let overrides = AgentOverrides {
                config,
                keys,
                provider,
                model,
                difficulty,
            };
            run_play(mode.into(), size, overrides).await
        }
        Command::Models => {
            list_models();
            Ok(())
        }
    }
}

/// Agent settings collected from the command line.
#[derive(Debug)]
struct AgentOverrides {
    config: Option<PathBuf>,
    keys: Option<PathBuf>,
    provider: Option<LlmProvider>,
    model: Option<String>,
    difficulty: Option<Difficulty>,
}

/// Print the model menu
fn list_models() {
    for provider in LlmProvider::iter() {
        println!("{} (default {})", provider, provider.default_model());
        for model in provider.known_models() {
            println!("  {}", model);
        }
    }
}

/// Play one game in the terminal
#[instrument(skip(overrides))]
async fn run_play(mode: GameMode, size: usize, overrides: AgentOverrides) -> Result<()> {
    let game = GameState::with_size(mode, size)?;
    info!("Starting game");

    let black: Box<dyn Participant> = Box::new(HumanPlayer::stdio("Black"));
    let white: Box<dyn Participant> = match mode {
        GameMode::HumanVsHuman => Box::new(HumanPlayer::stdio("White")),
        GameMode::HumanVsAgent => Box::new(build_agent(overrides)?),
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(game, black, white, event_tx);

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    let result = orchestrator.run().await;
    drop(orchestrator);
    printer.await?;

    result.map(|_| ())
}

/// Build the LLM agent from config file, keys and overrides
#[instrument]
fn build_agent(overrides: AgentOverrides) -> Result<AgentPlayer> {
    let keys = match &overrides.keys {
        Some(path) => ApiKeys::from_file(path)?,
        None => ApiKeys::from_env(),
    };

    let mut config = match &overrides.config {
        Some(path) => AgentConfig::from_file(path)?,
        None => {
            let provider = keys
                .preferred_provider()
                .ok_or_else(|| anyhow::anyhow!("No API key found for any provider"))?;
            AgentConfig::new("AI".to_string()).with_provider(provider)
        }
    };
    if let Some(provider) = overrides.provider {
        config = config.switch_provider(provider);
    }
    if let Some(model) = overrides.model {
        config = config.with_model(model);
    }
    if let Some(difficulty) = overrides.difficulty {
        config = config.with_difficulty(difficulty);
    }
    config.warn_if_unknown_model();

    info!(provider = %config.provider(), model = %config.model(), difficulty = %config.difficulty(), "Agent configured");
    let client = LlmClient::new(config.create_llm_config(&keys)?);
    let proposer = LlmProposer::new(config.name().clone(), client, *config.difficulty());
    Ok(AgentPlayer::new(config.name().clone(), Box::new(proposer)))
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::StateChanged(_) => {}
        GameEvent::AgentThinking(player) => println!("{} is thinking...", player),
        GameEvent::MoveMade {
            by,
            coord,
            flipped,
            provenance,
            ..
        } => {
            let note = match provenance {
                Provenance::Fallback => " after two unusable answers",
                _ => "",
            };
            println!("{} -> {} ({} flipped){}", by, coord, flipped, note);
        }
        GameEvent::Passed { skipped } => println!("{} has no legal move and passes.", skipped),
        GameEvent::MoveRejected { by, coord, reason } => {
            println!("{} tried {}: {}", by, coord, reason);
        }
        GameEvent::GameOver { message, .. } => println!("\n{}", message),
    }
}
