//! Agent configuration: provider, model, difficulty and API keys.

use crate::llm_client::{ANTHROPIC_API_VERSION, LlmConfig, LlmProvider, ProviderConfig};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// How strong the agent is asked to play.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Beginner persona.
    Easy,
    /// Intermediate persona.
    Medium,
    /// World-class persona.
    #[default]
    Hard,
}

/// Configuration for an LLM-backed agent.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AgentConfig {
    /// Agent name shown in the move log.
    #[setters(into)]
    name: String,

    /// LLM provider (openai, anthropic or gemini).
    #[serde(default = "default_provider")]
    provider: LlmProvider,

    /// Model name. Falls back to the provider default when absent.
    #[getter(skip)]
    #[setters(strip_option, into)]
    #[serde(default)]
    model: Option<String>,

    /// Maximum tokens for LLM responses (Anthropic only).
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// Persona strength.
    #[serde(default)]
    difficulty: Difficulty,
}

#[instrument]
fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

// A move is a handful of tokens.
#[instrument]
fn default_max_tokens() -> u32 {
    10
}

#[instrument]
fn default_temperature() -> f32 {
    0.0
}

impl AgentConfig {
    /// Creates a configuration with defaults for everything but the name.
    #[instrument(skip(name), fields(agent_name = %name))]
    pub fn new(name: String) -> Self {
        Self {
            name,
            provider: default_provider(),
            model: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            difficulty: Difficulty::default(),
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.warn_if_unknown_model();
        info!(agent_name = %config.name, provider = %config.provider, "Config loaded successfully");
        Ok(config)
    }

    /// Switches provider. A model set for a different provider is cleared
    /// so the new provider's default applies.
    #[instrument(skip(self), fields(from = %self.provider))]
    pub fn switch_provider(mut self, provider: LlmProvider) -> Self {
        if provider != self.provider {
            debug!(to = %provider, "Provider changed, resetting model");
            self.model = None;
        }
        self.provider = provider;
        self
    }

    /// Model name, resolved against the provider default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Logs a warning when the model is not in the provider's menu.
    pub fn warn_if_unknown_model(&self) {
        let model = self.model();
        if !self.provider.known_models().contains(&model) && model != self.provider.default_model()
        {
            warn!(provider = %self.provider, model, "Model is not in the known list");
        }
    }

    /// Builds provider settings using a key from `keys`.
    #[instrument(skip(self, keys), fields(provider = %self.provider, model = %self.model()))]
    pub fn provider_config(&self, keys: &ApiKeys) -> Result<ProviderConfig, ConfigError> {
        debug!("Resolving provider settings");
        let api_key = keys
            .key_for(self.provider)
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "No API key for {} (set {} or provide a keys file)",
                    self.provider,
                    self.provider.key_env_var()
                ))
            })?
            .to_string();
        let model = self.model().to_string();

        Ok(match self.provider {
            LlmProvider::OpenAI => ProviderConfig::OpenAI { api_key, model },
            LlmProvider::Anthropic => ProviderConfig::Anthropic {
                api_key,
                model,
                api_version: ANTHROPIC_API_VERSION.to_string(),
            },
            LlmProvider::Gemini => ProviderConfig::Gemini { api_key, model },
        })
    }

    /// Creates LLM configuration from this agent config.
    #[instrument(skip(self, keys))]
    pub fn create_llm_config(&self, keys: &ApiKeys) -> Result<LlmConfig, ConfigError> {
        Ok(LlmConfig::new(
            self.provider_config(keys)?,
            self.max_tokens,
            self.temperature,
        ))
    }
}

/// API keys, one per provider.
///
/// The JSON keys file uses the provider names as fields:
/// `{"openai": "...", "anthropic": "...", "gemini": "..."}`. Blank entries
/// count as missing.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    openai: Option<String>,
    #[serde(default)]
    anthropic: Option<String>,
    #[serde(default)]
    gemini: Option<String>,
}

impl ApiKeys {
    /// Creates a key set from explicit values.
    pub fn new(
        openai: Option<String>,
        anthropic: Option<String>,
        gemini: Option<String>,
    ) -> Self {
        Self {
            openai,
            anthropic,
            gemini,
        }
    }

    /// Reads keys from `OPENAI_API_KEY`, `ANTHROPIC_API_KEY` and `GEMINI_API_KEY`.
    #[instrument]
    pub fn from_env() -> Self {
        let read = |provider: LlmProvider| std::env::var(provider.key_env_var()).ok();
        let keys = Self::new(
            read(LlmProvider::OpenAI),
            read(LlmProvider::Anthropic),
            read(LlmProvider::Gemini),
        );
        debug!(available = ?keys.available(), "Keys loaded from environment");
        keys
    }

    /// Reads keys from a JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read keys file: {}", e)))?;
        let keys: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse keys file: {}", e)))?;
        info!(available = ?keys.available(), "Keys loaded from file");
        Ok(keys)
    }

    /// Key for `provider`, if present and not blank.
    pub fn key_for(&self, provider: LlmProvider) -> Option<&str> {
        let key = match provider {
            LlmProvider::OpenAI => &self.openai,
            LlmProvider::Anthropic => &self.anthropic,
            LlmProvider::Gemini => &self.gemini,
        };
        key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Providers with a usable key, in preference order.
    pub fn available(&self) -> Vec<LlmProvider> {
        [LlmProvider::OpenAI, LlmProvider::Anthropic, LlmProvider::Gemini]
            .into_iter()
            .filter(|p| self.key_for(*p).is_some())
            .collect()
    }

    /// First provider with a key: OpenAI, then Anthropic, then Gemini.
    pub fn preferred_provider(&self) -> Option<LlmProvider> {
        self.available().first().copied()
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeys")
            .field("available", &self.available())
            .finish()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
