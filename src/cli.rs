//! Command-line interface for othello_challenge.

use clap::{Parser, Subcommand, ValueEnum};
use othello_challenge::{Difficulty, LlmProvider};
use strictly_othello::GameMode;

/// Othello Challenge - Othello against a human or an LLM agent
#[derive(Parser, Debug)]
#[command(name = "othello_challenge")]
#[command(about = "Play Othello against a friend or an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Who plays White.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Two humans at one terminal
    Pvp,
    /// Human (Black) against an LLM agent (White)
    Agent,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => GameMode::HumanVsHuman,
            ModeArg::Agent => GameMode::HumanVsAgent,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Game mode
        #[arg(short, long, value_enum, default_value = "pvp")]
        mode: ModeArg,

        /// Board size (even, 2-26)
        #[arg(long, default_value = "8")]
        size: usize,

        /// Path to agent configuration file (TOML)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Path to API keys file (JSON); defaults to environment variables
        #[arg(short, long)]
        keys: Option<std::path::PathBuf>,

        /// Override the LLM provider
        #[arg(long, value_enum)]
        provider: Option<LlmProvider>,

        /// Override the model name
        #[arg(long)]
        model: Option<String>,

        /// Override the agent difficulty
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
    },

    /// List known models per provider
    Models,
}
