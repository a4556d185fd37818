//! `OpenAI` chat-completions gateway

use super::types::ChatMessage;
use super::{CompletionGateway, GatewayError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling temperature used for every completion
pub const TEMPERATURE: f64 = 0.7;

/// Upper bound on completion length, in tokens
pub const MAX_OUTPUT_TOKENS: u32 = 600;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4";

/// API root used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions client for `OpenAI` and `OpenAI`-compatible endpoints
pub struct OpenAIGateway {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAIGateway {
    /// Build a gateway whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a `Network` error if the HTTP client cannot be constructed.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    fn translate_request<'a>(&'a self, messages: &'a [ChatMessage]) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| OpenAIMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    fn normalize_response(resp: OpenAIResponse) -> Result<String, GatewayError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::malformed("No choices in response"))?;

        let text = choice
            .message
            .content
            .ok_or_else(|| GatewayError::malformed("Completion has no text content"))?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::malformed("Completion text is empty"));
        }
        Ok(trimmed.to_string())
    }
}

/// Map a non-success HTTP status to an error kind
fn classify_status(status: StatusCode, message: &str) -> GatewayError {
    match status.as_u16() {
        401 | 403 => GatewayError::auth(format!("Authentication failed: {message}")),
        429 => GatewayError::rate_limit(format!("Rate limit or quota exceeded: {message}")),
        400 => GatewayError::invalid_request(format!("Invalid request: {message}")),
        500..=599 => GatewayError::server_error(format!("Server error: {message}")),
        _ => GatewayError::unknown(format!("HTTP {status}: {message}")),
    }
}

#[async_trait]
impl CompletionGateway for OpenAIGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        if messages.is_empty() {
            return Err(GatewayError::invalid_request("No messages to send"));
        }

        let request = self.translate_request(messages);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    GatewayError::network(format!("Connection failed: {e}"))
                } else {
                    GatewayError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OpenAIErrorResponse>(&body)
                .map_or(body, |resp| resp.error.message);
            return Err(classify_status(status, &message));
        }

        let parsed: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::malformed(format!("Failed to parse response: {e}")))?;

        Self::normalize_response(parsed)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}
