//! Chat sessions
//!
//! A `ChatSession` exclusively owns one transcript and the turn-taking state.
//! The `SessionManager` keeps one per browser session and drops it when the
//! session ends. Nothing is persisted.

use crate::brand::Brand;
use crate::llm::{ChatMessage, CompletionGateway, GatewayError};
use crate::state_machine::{transition, ChatState, Effect, Event, RequestId, TransitionError};
use crate::topic::Topic;
use crate::transcript::{Transcript, Turn};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub type SessionId = Uuid;

/// `[system(topic)] + history`. Does not touch the transcript.
pub fn build_request(brand: Brand, topic: Topic, history: &[Turn]) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage::system(brand.topic_prompt(topic)))
        .chain(history.iter().map(Turn::to_message))
        .collect()
}

/// Request the session wants sent once its lock is released
#[derive(Debug)]
struct PendingRequest {
    request_id: RequestId,
    messages: Vec<ChatMessage>,
}

pub struct ChatSession {
    id: SessionId,
    brand: Brand,
    state: ChatState,
    transcript: Transcript,
    next_request_id: RequestId,
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Serializable view of a session for rendering
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub state: ChatState,
    pub turns: Vec<Turn>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(id: SessionId, brand: Brand) -> Self {
        let now = Utc::now();
        Self {
            id,
            brand,
            state: ChatState::Idle,
            transcript: Transcript::new(),
            next_request_id: 0,
            last_error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[cfg(test)]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            state: self.state,
            turns: self.transcript.all().to_vec(),
            last_error: self.last_error.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, max_idle: Duration) -> bool {
        if self.state != ChatState::Idle {
            return false;
        }
        // A clock step backwards counts as fresh activity
        (now - self.updated_at)
            .to_std()
            .is_ok_and(|idle| idle >= max_idle)
    }

    /// Begin a turn. Returns the request to send, or `None` for blank input.
    fn begin_turn(
        &mut self,
        topic: Topic,
        text: String,
    ) -> Result<Option<PendingRequest>, TransitionError> {
        let request_id = self.next_request_id + 1;
        let pending = self.handle(Event::UserSubmit {
            text,
            topic,
            request_id,
        })?;
        if pending.is_some() {
            self.next_request_id = request_id;
        }
        Ok(pending)
    }

    /// Discard the transcript. Any reply still in flight is dropped on arrival.
    pub fn clear(&mut self) {
        // Clear is accepted from every state
        if let Err(e) = self.handle(Event::Clear) {
            tracing::warn!(session = %self.id, error = %e, "Clear rejected");
        }
    }

    /// Run the state machine and carry out its effects
    fn handle(&mut self, event: Event) -> Result<Option<PendingRequest>, TransitionError> {
        let result = transition(&self.state, event)?;
        if result.new_state != self.state || !result.effects.is_empty() {
            self.updated_at = Utc::now();
        }
        self.state = result.new_state;

        let mut pending = None;
        for effect in result.effects {
            match effect {
                Effect::AppendTurn(turn) => {
                    self.transcript.append(turn);
                    self.last_error = None;
                }
                Effect::ClearTranscript => {
                    self.transcript.clear();
                    self.last_error = None;
                }
                Effect::RequestCompletion { request_id, topic } => {
                    pending = Some(PendingRequest {
                        request_id,
                        messages: build_request(self.brand, topic, self.transcript.all()),
                    });
                }
                Effect::ReportError(error) => {
                    self.last_error = Some(error.user_message().to_string());
                }
            }
        }
        Ok(pending)
    }
}

/// What became of one chat submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// Assistant turn appended
    Replied(String),
    /// Gateway failed; the user turn was kept
    Failed(GatewayError),
    /// Transcript was cleared while the reply was in flight
    Discarded,
}

/// Run one chat turn against `session`. The session lock is released while
/// the gateway call is outstanding, so a concurrent submit sees `Busy`.
///
/// The gateway call and the reply event run on a detached task. If the caller
/// is dropped mid-call the session still returns to `Idle` when the reply or
/// failure arrives.
///
/// # Errors
///
/// Returns `TransitionError::Busy` if a reply is already outstanding.
pub async fn run_turn(
    session: Arc<Mutex<ChatSession>>,
    gateway: Arc<dyn CompletionGateway>,
    topic: Topic,
    text: String,
) -> Result<TurnOutcome, TransitionError> {
    let pending = {
        let mut guard = session.lock().await;
        match guard.begin_turn(topic, text)? {
            Some(pending) => pending,
            None => return Ok(TurnOutcome::Ignored),
        }
    };

    let request_id = pending.request_id;
    let task = tokio::spawn(complete_turn(session.clone(), gateway, pending));
    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            // The reply task panicked; settle the turn as failed
            let error = GatewayError::unknown(format!("Reply task failed: {e}"));
            let mut guard = session.lock().await;
            tracing::error!(session = %guard.id, error = %e, "Chat turn task failed");
            guard.handle(Event::ReplyFailed {
                request_id,
                error: error.clone(),
            })?;
            Ok(TurnOutcome::Failed(error))
        }
    }
}

async fn complete_turn(
    session: Arc<Mutex<ChatSession>>,
    gateway: Arc<dyn CompletionGateway>,
    pending: PendingRequest,
) -> Result<TurnOutcome, TransitionError> {
    let result = gateway.complete(&pending.messages).await;

    let mut guard = session.lock().await;
    let (event, outcome) = match result {
        Ok(text) => (
            Event::ReplyReceived {
                request_id: pending.request_id,
                text: text.clone(),
            },
            TurnOutcome::Replied(text),
        ),
        Err(error) => {
            tracing::warn!(session = %guard.id, kind = error.kind.as_str(), "Chat turn failed");
            (
                Event::ReplyFailed {
                    request_id: pending.request_id,
                    error: error.clone(),
                },
                TurnOutcome::Failed(error),
            )
        }
    };

    let was_current = guard.state == ChatState::AwaitingReply {
        request_id: pending.request_id,
    };
    guard.handle(event)?;

    if was_current {
        tracing::debug!(session = %guard.id, turns = guard.transcript.len(), "Chat turn finished");
        Ok(outcome)
    } else {
        tracing::debug!(session = %guard.id, request_id = pending.request_id, "Dropped stale reply");
        Ok(TurnOutcome::Discarded)
    }
}

/// Single-shot query. Nothing is kept between calls; blank queries make no call.
///
/// # Errors
///
/// Propagates the gateway error.
pub async fn search(
    gateway: &dyn CompletionGateway,
    brand: Brand,
    query: &str,
) -> Result<Option<String>, GatewayError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }
    let messages = [
        ChatMessage::system(brand.search_prompt()),
        ChatMessage::user(query),
    ];
    gateway.complete(&messages).await.map(Some)
}

/// Owns every live session
pub struct SessionManager {
    brand: Brand,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<ChatSession>>>>,
}

impl SessionManager {
    pub fn new(brand: Brand) -> Self {
        Self {
            brand,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create(&self) -> SessionId {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(ChatSession::new(id, self.brand)));
        let live = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(id, session);
            sessions.len()
        };
        tracing::info!(session = %id, live, "Session started");
        id
    }

    pub async fn get(&self, id: &SessionId) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// End every session idle for at least `max_idle`. Sessions waiting on a
    /// reply or locked by a request in progress are kept. Returns the number
    /// ended.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => !guard.is_expired(now, max_idle),
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, live = sessions.len(), "Expired idle sessions");
        }
        evicted
    }

    /// End a session, dropping its transcript. Returns false if unknown.
    pub async fn remove(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session = %id, "Session ended");
        }
        removed
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
