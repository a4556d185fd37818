//! Conversation transcript
//!
//! An append-only, session-scoped history of role-tagged turns. The only
//! way to remove a turn is to clear everything.

use crate::llm::{ChatMessage, Role};
use serde::Serialize;

/// One role-tagged message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::new(self.role(), self.content())
    }
}

/// Ordered history of turns for one session
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Turns in insertion order
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Count of turns with the given role
    #[cfg(test)]
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_turn() -> impl Strategy<Value = Turn> {
        (
            prop_oneof![Just(Role::User), Just(Role::Assistant)],
            "\\PC{1,40}",
        )
            .prop_map(|(role, content)| Turn::new(role, content))
    }

    proptest! {
        #[test]
        fn prop_all_preserves_insertion_order(turns in prop::collection::vec(arb_turn(), 0..30)) {
            let mut transcript = Transcript::new();
            for turn in &turns {
                transcript.append(turn.clone());
            }
            prop_assert_eq!(transcript.all(), turns.as_slice());
        }

        #[test]
        fn prop_clear_always_empties(turns in prop::collection::vec(arb_turn(), 0..30)) {
            let mut transcript = Transcript::new();
            for turn in turns {
                transcript.append(turn);
            }
            transcript.clear();
            prop_assert!(transcript.all().is_empty());
            prop_assert_eq!(transcript.len(), 0);
        }
    }

    #[test]
    fn test_double_clear_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("hello"));
        transcript.clear();
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_content_is_stored_verbatim() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("  <b>spaced</b>  "));
        assert_eq!(transcript.all()[0].content(), "  <b>spaced</b>  ");
        assert_eq!(transcript.all()[0].role(), Role::User);
    }

    #[test]
    fn test_turn_serializes_role_lowercase() {
        let json = serde_json::to_value(Turn::assistant("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "hi" }));
    }

    #[test]
    fn test_count_by_role() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::user("q1"));
        transcript.append(Turn::assistant("a1"));
        transcript.append(Turn::user("q2"));
        assert_eq!(transcript.count(Role::User), 2);
        assert_eq!(transcript.count(Role::Assistant), 1);
        assert_eq!(transcript.all()[1].to_message(), ChatMessage::assistant("a1"));
    }
}
