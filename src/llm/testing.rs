//! Mock gateway for tests

use super::{ChatMessage, CompletionGateway, GatewayError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

/// Mock gateway that returns queued replies and records every request
pub struct MockGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    model_id: String,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    /// When set, `complete` parks until `release` is called
    hold: Mutex<bool>,
    entered: Notify,
    released: Notify,
}

impl MockGateway {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
            hold: Mutex::new(false),
            entered: Notify::new(),
            released: Notify::new(),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue an error
    pub fn queue_error(&self, error: GatewayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Make the next calls block until `release`
    pub fn hold_calls(&self) {
        *self.hold.lock().unwrap() = true;
    }

    /// Wait until a call has entered `complete`
    pub async fn wait_for_call(&self) {
        self.entered.notified().await;
    }

    /// Stop parking new calls
    pub fn resume_calls(&self) {
        *self.hold.lock().unwrap() = false;
    }

    /// Let a held call finish
    pub fn release(&self) {
        self.released.notify_one();
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionGateway for MockGateway {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let held = *self.hold.lock().unwrap();
        if held {
            self.entered.notify_one();
            self.released.notified().await;
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::network("No mock reply queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
