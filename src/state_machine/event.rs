//! Events that can occur in a chat session

use crate::llm::GatewayError;
use crate::topic::Topic;

/// Identifies one outstanding completion request within a session
pub type RequestId = u64;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Text submitted from the chat input
    UserSubmit {
        text: String,
        topic: Topic,
        request_id: RequestId,
    },

    /// Completion arrived for `request_id`
    ReplyReceived { request_id: RequestId, text: String },

    /// Completion call for `request_id` failed
    ReplyFailed {
        request_id: RequestId,
        error: GatewayError,
    },

    /// "Clear Chat"
    Clear,
}
