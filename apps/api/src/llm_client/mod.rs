//! LLM Client: the single point of entry for every chat-completion call.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! All LLM interactions MUST go through `ChatCompletion`.
//!
//! One request per call, bounded by the configured timeout. No retries.
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        body: String,
    },

    #[error("LLM returned no choices")]
    EmptyChoices,

    #[error("Unexpected response shape: {reason}")]
    UnexpectedShape { reason: String, body: String },
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Status and body of an upstream call, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: StatusCode,
    pub body: String,
}

/// Anything that can turn a system + user message pair into the model's reply text.
///
/// Carried in `AppState` as `Arc<dyn ChatCompletion>` so tests can swap in stubs.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// OpenAI-compatible chat-completion client (Groq by default).
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    config: LlmConfig,
}

impl ChatClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Sends one completion request and returns the untouched status and body.
    /// Fails with `MissingApiKey` before touching the network when no key is set.
    pub async fn send_raw(&self, system: &str, user: &str) -> Result<RawReply, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(LlmError::MissingApiKey)?;

        let request_body = ChatRequest {
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
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(RawReply { status, body })
    }
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let reply = self.send_raw(system, user).await?;
        read_completion(reply.status, &reply.body)
    }
}

/// Interprets an upstream reply, keeping only `choices[0].message.content`.
fn read_completion(status: StatusCode, body: &str) -> Result<String, LlmError> {
    if !status.is_success() {
        warn!("LLM API returned {}", status);
        let message = serde_json::from_str::<ApiError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| status.to_string());
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
            body: body.to_string(),
        });
    }

    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::UnexpectedShape {
            reason: e.to_string(),
            body: body.to_string(),
        })?;

    if let Some(usage) = &response.usage {
        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    let first = response
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyChoices)?;

    first
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| LlmError::UnexpectedShape {
            reason: "choices[0].message.content is missing".to_string(),
            body: body.to_string(),
        })
}
