//! API request and response types

use crate::brand::BrandInfo;
use crate::session::SessionId;
use crate::state_machine::ChatState;
use crate::topic::{QuickGuide, Topic};
use crate::transcript::Turn;
use serde::{Deserialize, Serialize};

/// Request to run one chat turn
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub topic: Topic,
    pub text: String,
}

/// Response for a chat turn. `reply` is absent for blank input or when the
/// transcript was cleared while waiting.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: Option<String>,
    pub state: ChatState,
    pub turns: Vec<Turn>,
}

/// Single-shot question
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub id: SessionId,
}

/// Response for lifecycle actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct BrandResponse {
    #[serde(flatten)]
    pub info: BrandInfo,
    pub model: String,
}

/// One navigation entry
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub name: &'static str,
    /// "search" or "chat"
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_guide: Option<&'static QuickGuide>,
}

#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub pages: Vec<PageInfo>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            kind: None,
        }
    }
}
