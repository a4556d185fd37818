//! Chat session state

use super::RequestId;
use serde::Serialize;

/// Chat state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for user input, no request outstanding
    #[default]
    Idle,

    /// Completion request in flight
    AwaitingReply { request_id: RequestId },
}
