use crate::model::CommentaryModel;
use crate::types::{CriticError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed sampling and endpoint parameters for the generation service.
/// These are configuration constants, not user-exposed knobs.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.deepseek.com/v1/chat/completions".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_seconds: 60,
        }
    }
}

/// HTTP client for an OpenAI-style chat-completions endpoint.
///
/// One request per attempt, no retry: transport failures and non-success
/// statuses surface directly so the pipeline can record them.
pub struct ChatCompletionClient {
    client: Client,
    config: GeneratorConfig,
    api_key: String,
}

impl ChatCompletionClient {
    pub fn new(api_key: impl Into<String>, config: GeneratorConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            api_key: api_key.into(),
        }
    }

    /// Builds a client from the `DEEPSEEK_API_KEY` environment variable.
    /// The credential is a required, externally supplied secret.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("DEEPSEEK_API_KEY").map_err(|_| CriticError::MissingCredential)?;
        if api_key.is_empty() {
            return Err(CriticError::MissingCredential);
        }
        Ok(Self::new(api_key, GeneratorConfig::default()))
    }

    /// Replaces the configuration, rebuilding the HTTP client so the new
    /// timeout takes effect.
    pub fn with_config(self, config: GeneratorConfig) -> Self {
        Self::new(self.api_key, config)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl CommentaryModel for ChatCompletionClient {
    fn model_name(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Submitting completion request to {}", self.config.api_base);

        let response = self
            .client
            .post(&self.config.api_base)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Generation service returned status {}", status);
            return Err(CriticError::Api {
                status: status.as_u16(),
            });
        }

        let envelope: ChatResponse = response.json().await?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                CriticError::MalformedResponse("response envelope had no choices".to_string())
            })?;

        debug!("Received {} bytes of commentary payload", content.len());
        Ok(content)
    }
}
