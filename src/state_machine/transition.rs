//! Pure state transition function

use super::{ChatState, Effect, Event};
use crate::transcript::Turn;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug, PartialEq)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Still waiting for the previous reply")]
    Busy,
}

/// Pure transition function: same inputs, same outputs, no I/O.
///
/// # Errors
///
/// Rejects a submission while a reply is outstanding.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Blank input is ignored without leaving Idle
        (ChatState::Idle, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(ChatState::Idle))
        }

        (
            ChatState::Idle,
            Event::UserSubmit {
                text,
                topic,
                request_id,
            },
        ) => Ok(TransitionResult::new(ChatState::AwaitingReply { request_id })
            .with_effect(Effect::AppendTurn(Turn::user(text)))
            .with_effect(Effect::RequestCompletion { request_id, topic })),

        (ChatState::AwaitingReply { .. }, Event::UserSubmit { .. }) => Err(TransitionError::Busy),

        (
            ChatState::AwaitingReply { request_id: pending },
            Event::ReplyReceived { request_id, text },
        ) if *pending == request_id => Ok(TransitionResult::new(ChatState::Idle)
            .with_effect(Effect::AppendTurn(Turn::assistant(text)))),

        // The user turn stays; no assistant turn is added
        (
            ChatState::AwaitingReply { request_id: pending },
            Event::ReplyFailed { request_id, error },
        ) if *pending == request_id => {
            Ok(TransitionResult::new(ChatState::Idle).with_effect(Effect::ReportError(error)))
        }

        // Reply for a request that was cleared away
        (_, Event::ReplyReceived { .. } | Event::ReplyFailed { .. }) => {
            Ok(TransitionResult::new(*state))
        }

        (_, Event::Clear) => {
            Ok(TransitionResult::new(ChatState::Idle).with_effect(Effect::ClearTranscript))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GatewayError;
    use crate::topic::Topic;

    fn submit(text: &str, request_id: u64) -> Event {
        Event::UserSubmit {
            text: text.to_string(),
            topic: Topic::Excel,
            request_id,
        }
    }

    #[test]
    fn test_idle_submit_requests_completion() {
        let result = transition(&ChatState::Idle, submit("How do I freeze a row?", 1)).unwrap();
        assert_eq!(result.new_state, ChatState::AwaitingReply { request_id: 1 });
        assert_eq!(
            result.effects,
            vec![
                Effect::AppendTurn(Turn::user("How do I freeze a row?")),
                Effect::RequestCompletion {
                    request_id: 1,
                    topic: Topic::Excel
                },
            ]
        );
    }

    #[test]
    fn test_blank_submit_is_noop() {
        for text in ["", "   ", "\n\t"] {
            let result = transition(&ChatState::Idle, submit(text, 1)).unwrap();
            assert_eq!(result, TransitionResult::new(ChatState::Idle));
        }
    }

    #[test]
    fn test_submit_while_awaiting_is_busy() {
        let state = ChatState::AwaitingReply { request_id: 3 };
        assert_eq!(transition(&state, submit("again", 4)), Err(TransitionError::Busy));
        // Even blank input is rejected while busy
        assert_eq!(transition(&state, submit("", 4)), Err(TransitionError::Busy));
    }

    #[test]
    fn test_reply_appends_assistant_turn() {
        let state = ChatState::AwaitingReply { request_id: 7 };
        let result = transition(
            &state,
            Event::ReplyReceived {
                request_id: 7,
                text: "Use Freeze Panes.".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, ChatState::Idle);
        assert_eq!(
            result.effects,
            vec![Effect::AppendTurn(Turn::assistant("Use Freeze Panes."))]
        );
    }

    #[test]
    fn test_failure_reports_without_assistant_turn() {
        let state = ChatState::AwaitingReply { request_id: 7 };
        let error = GatewayError::network("connection reset");
        let result = transition(
            &state,
            Event::ReplyFailed {
                request_id: 7,
                error: error.clone(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, ChatState::Idle);
        assert_eq!(result.effects, vec![Effect::ReportError(error)]);
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let stale = Event::ReplyReceived {
            request_id: 1,
            text: "late".to_string(),
        };
        let idle = transition(&ChatState::Idle, stale.clone()).unwrap();
        assert_eq!(idle, TransitionResult::new(ChatState::Idle));

        let newer = ChatState::AwaitingReply { request_id: 2 };
        let result = transition(&newer, stale).unwrap();
        assert_eq!(result, TransitionResult::new(newer));

        let failed = Event::ReplyFailed {
            request_id: 1,
            error: GatewayError::unknown("late"),
        };
        assert_eq!(
            transition(&newer, failed).unwrap(),
            TransitionResult::new(newer)
        );
    }

    #[test]
    fn test_clear_from_any_state() {
        for state in [ChatState::Idle, ChatState::AwaitingReply { request_id: 9 }] {
            let result = transition(&state, Event::Clear).unwrap();
            assert_eq!(result.new_state, ChatState::Idle);
            assert_eq!(result.effects, vec![Effect::ClearTranscript]);
        }
    }
}
