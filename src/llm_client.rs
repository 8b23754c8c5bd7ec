//! LLM API client abstraction for OpenAI, Anthropic and Gemini.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strictly_othello::proposal::PASS;
use tracing::{debug, error, info, instrument, warn};

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";

/// Default `anthropic-version` header value.
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// LLM provider selection.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum LlmProvider {
    /// OpenAI (GPT models).
    #[value(name = "openai")]
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
    /// Google Gemini.
    Gemini,
}

impl LlmProvider {
    /// Model used when none is configured.
    #[instrument]
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "gpt-4o-mini",
            LlmProvider::Anthropic => "claude-3-5-sonnet-latest",
            LlmProvider::Gemini => "gemini-2.5-flash",
        }
    }

    /// Models offered for selection, fastest first where it matters.
    #[instrument]
    pub fn known_models(self) -> &'static [&'static str] {
        match self {
            LlmProvider::OpenAI => &["gpt-5-mini", "gpt-4o-mini", "gpt-4o"],
            LlmProvider::Anthropic => &["claude-3-5-sonnet", "claude-3-5-haiku", "claude-3-opus"],
            LlmProvider::Gemini => &["gemini-2.5-pro", "gemini-2.5-flash", "gemini-2.5-flash-lite"],
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn key_env_var(self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Provider-specific connection settings.
#[derive(Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// OpenAI chat completions.
    OpenAI {
        /// Bearer token.
        api_key: String,
        /// Model name.
        model: String,
    },
    /// Anthropic messages API.
    Anthropic {
        /// `x-api-key` header value.
        api_key: String,
        /// Model name.
        model: String,
        /// `anthropic-version` header value.
        api_version: String,
    },
    /// Gemini `generateContent`.
    Gemini {
        /// Query-string key.
        api_key: String,
        /// Model name.
        model: String,
    },
}

impl ProviderConfig {
    /// Which provider this configures.
    pub fn provider(&self) -> LlmProvider {
        match self {
            ProviderConfig::OpenAI { .. } => LlmProvider::OpenAI,
            ProviderConfig::Anthropic { .. } => LlmProvider::Anthropic,
            ProviderConfig::Gemini { .. } => LlmProvider::Gemini,
        }
    }

    /// Model name.
    pub fn model(&self) -> &str {
        match self {
            ProviderConfig::OpenAI { model, .. }
            | ProviderConfig::Anthropic { model, .. }
            | ProviderConfig::Gemini { model, .. } => model,
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider())
            .field("model", &self.model())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    provider: ProviderConfig,
    max_tokens: u32,
    temperature: f32,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(provider), fields(provider = %provider.provider(), model = %provider.model()))]
    pub fn new(provider: ProviderConfig, max_tokens: u32, temperature: f32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            max_tokens,
            temperature,
        }
    }

    /// Gets the provider settings.
    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Gets the sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = %config.provider.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    ///
    /// A response without text content is read as [`PASS`].
    #[instrument(skip(self, system_prompt, user_message), fields(provider = %self.config.provider.provider(), model = %self.config.model()))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Generating completion");
        let content = match &self.config.provider {
            ProviderConfig::OpenAI { api_key, model } => {
                self.generate_openai(api_key, model, system_prompt, user_message)
                    .await?
            }
            ProviderConfig::Anthropic {
                api_key,
                model,
                api_version,
            } => {
                self.generate_anthropic(api_key, model, api_version, system_prompt, user_message)
                    .await?
            }
            ProviderConfig::Gemini { api_key, model } => {
                self.generate_gemini(api_key, model, system_prompt, user_message)
                    .await?
            }
        };

        Ok(text_or_pass(content))
    }

    /// Generates a completion using OpenAI.
    #[instrument(skip_all)]
    async fn generate_openai(
        &self,
        api_key: &str,
        model: &str,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Option<String>, LlmError> {
        debug!("Creating OpenAI client");

        let client = OpenAIClient::with_config(OpenAIConfig::new().with_api_key(api_key));

        debug!("Building chat completion request");
        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build system message: {}", e)))?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()
                    .map_err(|e| LlmError::new(format!("Failed to build user message: {}", e)))?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(self.config.temperature)
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build request: {}", e)))?;

        debug!("Sending request to OpenAI");
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::new(format!("OpenAI API error: {}", e)))?;

        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone()))
    }

    /// Generates a completion using Anthropic Claude.
    #[instrument(skip_all)]
    async fn generate_anthropic(
        &self,
        api_key: &str,
        model: &str,
        api_version: &str,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Option<String>, LlmError> {
        debug!("Building Anthropic API request");
        let request_body = serde_json::json!({
            "model": model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_message
                }
            ]
        });

        let request = self
            .http
            .post(ANTHROPIC_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", api_version)
            .json(&request_body);

        let response_json = send_json(request, "Anthropic").await?;
        Ok(anthropic_text(&response_json))
    }

    /// Generates a completion using Google Gemini.
    #[instrument(skip_all)]
    async fn generate_gemini(
        &self,
        api_key: &str,
        model: &str,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Option<String>, LlmError> {
        debug!("Building Gemini API request");
        let request_body = gemini_body(system_prompt, user_message, self.config.temperature);

        let request = self
            .http
            .post(format!("{}/{}:generateContent", GEMINI_BASE_URL, model))
            .query(&[("key", api_key)])
            .json(&request_body);

        let response_json = send_json(request, "Gemini").await?;
        Ok(gemini_text(&response_json))
    }
}

/// Sends a JSON request and parses the JSON response, mapping HTTP failures.
#[instrument(skip(request))]
async fn send_json(
    request: reqwest::RequestBuilder,
    provider: &str,
) -> Result<serde_json::Value, LlmError> {
    debug!("Sending request");
    let response = request
        .send()
        .await
        .map_err(|e| LlmError::new(format!("{} API request failed: {}", provider, e)))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| LlmError::new(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        error!(status = %status, response = %response_text, "API error");
        return Err(LlmError::new(format!(
            "{} API error {}: {}",
            provider, status, response_text
        )));
    }

    debug!(response_length = response_text.len(), "Parsing response");
    serde_json::from_str(&response_text)
        .map_err(|e| LlmError::new(format!("Failed to parse response: {}", e)))
}

/// Reply text, trimmed; a missing or blank reply reads as [`PASS`].
fn text_or_pass(content: Option<String>) -> String {
    match content.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => {
            info!(content_length = text.len(), "Generated completion");
            text.to_string()
        }
        _ => {
            warn!("No text content in response, reading as PASS");
            PASS.to_string()
        }
    }
}

// The v1 endpoint takes the system prompt inline. No output cap: 2.5 models
// spend thinking tokens from it and a small cap leaves no text part.
fn gemini_body(system_prompt: &str, user_message: &str, temperature: f32) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": format!("{}\n\n{}", system_prompt, user_message) }]
            }
        ],
        "generationConfig": {
            "temperature": temperature
        }
    })
}

fn anthropic_text(response: &serde_json::Value) -> Option<String> {
    response["content"][0]["text"].as_str().map(str::to_string)
}

fn gemini_text(response: &serde_json::Value) -> Option<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serde_is_lowercase() {
        let json = serde_json::to_string(&LlmProvider::OpenAI).unwrap();
        assert_eq!(json, "\"openai\"");
        assert_eq!(LlmProvider::Gemini.to_string(), "gemini");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ProviderConfig::Gemini {
            api_key: "secret-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("gemini-2.5-flash"));
    }

    #[test]
    fn test_response_text_extraction() {
        let anthropic = serde_json::json!({ "content": [{ "type": "text", "text": "D3" }] });
        assert_eq!(anthropic_text(&anthropic).as_deref(), Some("D3"));

        let gemini = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "c4" }] } }]
        });
        assert_eq!(gemini_text(&gemini).as_deref(), Some("c4"));

        assert_eq!(gemini_text(&serde_json::json!({})), None);
    }

    #[test]
    fn test_missing_or_blank_reply_reads_as_pass() {
        assert_eq!(text_or_pass(None), PASS);
        assert_eq!(text_or_pass(Some(String::new())), PASS);
        assert_eq!(text_or_pass(Some(" \n".to_string())), PASS);
        assert_eq!(text_or_pass(Some("  d3 \n".to_string())), "d3");
    }

    #[test]
    fn test_gemini_body_has_no_output_cap() {
        let body = gemini_body("system", "user", 0.0);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "system\n\nuser");
        assert_eq!(body["generationConfig"]["temperature"], 0.0);
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_default_model_is_known_or_alias() {
        assert!(LlmProvider::Gemini
            .known_models()
            .contains(&LlmProvider::Gemini.default_model()));
        assert!(LlmProvider::OpenAI
            .known_models()
            .contains(&LlmProvider::OpenAI.default_model()));
    }
}
