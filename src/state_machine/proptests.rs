//! Property-based tests for the state machine

use super::*;
use crate::llm::{GatewayError, Role};
use crate::topic::Topic;
use crate::transcript::Transcript;
use proptest::prelude::*;

fn arb_topic() -> impl Strategy<Value = Topic> {
    proptest::sample::select(Topic::ALL.to_vec())
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
        6 => "[a-zA-Z?][a-zA-Z ?]{0,30}",
    ]
}

/// Outcome of the gateway call that follows a submission
#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    Fail,
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        "[a-z]{1,20}".prop_map(Outcome::Reply),
        Just(Outcome::Fail),
    ]
}

/// Apply transcript effects the way a session does
fn apply(transcript: &mut Transcript, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::AppendTurn(turn) => transcript.append(turn.clone()),
            Effect::ClearTranscript => transcript.clear(),
            Effect::RequestCompletion { .. } | Effect::ReportError(_) => {}
        }
    }
}

proptest! {
    #[test]
    fn prop_turn_deltas(
        steps in prop::collection::vec((arb_text(), arb_topic(), arb_outcome(), any::<bool>()), 1..20)
    ) {
        let mut state = ChatState::Idle;
        let mut transcript = Transcript::new();
        let mut next_id = 0u64;

        for (text, topic, outcome, clear_first) in steps {
            if clear_first {
                let result = transition(&state, Event::Clear).unwrap();
                apply(&mut transcript, &result.effects);
                state = result.new_state;
                prop_assert!(transcript.is_empty());
                prop_assert_eq!(state, ChatState::Idle);
            }

            let users = transcript.count(Role::User);
            let assistants = transcript.count(Role::Assistant);
            next_id += 1;

            let blank = text.trim().is_empty();
            let result = transition(&state, Event::UserSubmit { text, topic, request_id: next_id }).unwrap();
            apply(&mut transcript, &result.effects);
            state = result.new_state;

            if blank {
                prop_assert_eq!(state, ChatState::Idle);
                prop_assert_eq!(transcript.count(Role::User), users);
                continue;
            }

            prop_assert_eq!(state, ChatState::AwaitingReply { request_id: next_id });
            prop_assert!(
                result.effects.contains(&Effect::RequestCompletion { request_id: next_id, topic }),
                "submission must request a completion"
            );

            let event = match outcome {
                Outcome::Reply(text) => Event::ReplyReceived { request_id: next_id, text },
                Outcome::Fail => Event::ReplyFailed {
                    request_id: next_id,
                    error: GatewayError::server_error("boom"),
                },
            };
            let succeeded = matches!(event, Event::ReplyReceived { .. });
            let result = transition(&state, event).unwrap();
            apply(&mut transcript, &result.effects);
            state = result.new_state;

            prop_assert_eq!(state, ChatState::Idle);
            prop_assert_eq!(transcript.count(Role::User), users + 1);
            let expected_assistants = if succeeded { assistants + 1 } else { assistants };
            prop_assert_eq!(transcript.count(Role::Assistant), expected_assistants);
            if succeeded {
                let turns = transcript.all();
                prop_assert_eq!(turns[turns.len() - 2].role(), Role::User);
                prop_assert_eq!(turns[turns.len() - 1].role(), Role::Assistant);
            }
        }
    }

    #[test]
    fn prop_busy_only_while_awaiting(request_id in 1u64..1000, text in arb_text(), topic in arb_topic()) {
        let awaiting = ChatState::AwaitingReply { request_id };
        let event = Event::UserSubmit { text, topic, request_id: request_id + 1 };
        prop_assert_eq!(transition(&awaiting, event.clone()), Err(TransitionError::Busy));
        prop_assert!(transition(&ChatState::Idle, event).is_ok());
    }
}
