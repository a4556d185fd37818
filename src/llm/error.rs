//! Completion gateway error types

use thiserror::Error;

/// Gateway error with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::RateLimit, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::ServerError, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Malformed, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Unknown, message)
    }

    /// Short text suitable for showing to the person chatting
    pub fn user_message(&self) -> &'static str {
        match self.kind {
            GatewayErrorKind::Network => "The assistant could not be reached. Please try again.",
            GatewayErrorKind::Auth => "The assistant is not configured correctly (authentication failed).",
            GatewayErrorKind::RateLimit => "The assistant is busy or out of quota. Please try again later.",
            GatewayErrorKind::InvalidRequest => "The question could not be sent to the assistant.",
            GatewayErrorKind::ServerError => "The assistant service had a problem. Please try again.",
            GatewayErrorKind::Malformed | GatewayErrorKind::Unknown => {
                "The assistant returned an unexpected response."
            }
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Connection failures and timeouts
    Network,
    /// Authentication failed (401, 403)
    Auth,
    /// Rate limited or quota exceeded (429)
    RateLimit,
    /// Bad request (400), or an empty message list
    InvalidRequest,
    /// Server error (5xx)
    ServerError,
    /// Response body did not carry a completion
    Malformed,
    /// Anything else
    Unknown,
}

impl GatewayErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::RateLimit => "rate_limit",
            Self::InvalidRequest => "invalid_request",
            Self::ServerError => "server_error",
            Self::Malformed => "malformed",
            Self::Unknown => "unknown",
        }
    }
}
