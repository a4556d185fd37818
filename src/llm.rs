//! Completion gateway
//!
//! The boundary with the external chat-completion service.

mod error;
mod openai;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::{GatewayError, GatewayErrorKind};
pub use openai::{OpenAIGateway, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use types::{ChatMessage, Role};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion services
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Send role-tagged messages, first one conventionally the system
    /// instruction, and return the first completion's trimmed text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for completion gateways. Never logs message content.
pub struct LoggingGateway {
    inner: Arc<dyn CompletionGateway>,
    model_id: String,
}

impl LoggingGateway {
    pub fn new(inner: Arc<dyn CompletionGateway>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionGateway for LoggingGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(messages).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = messages.len(),
                    reply_chars = reply.chars().count(),
                    "Completion succeeded"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = messages.len(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Completion failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockGateway;
    use super::*;

    #[tokio::test]
    async fn test_logging_gateway_passes_through() {
        let mock = Arc::new(MockGateway::new("mock-model"));
        mock.queue_reply("fine");
        mock.queue_error(GatewayError::auth("bad key"));

        let logged = LoggingGateway::new(mock.clone());
        assert_eq!(logged.model_id(), "mock-model");

        let messages = [ChatMessage::user("hello")];
        assert_eq!(logged.complete(&messages).await.unwrap(), "fine");
        let err = logged.complete(&messages).await.unwrap_err();
        assert_eq!(err.kind, GatewayErrorKind::Auth);

        assert_eq!(mock.recorded_requests().len(), 2);
    }
}
