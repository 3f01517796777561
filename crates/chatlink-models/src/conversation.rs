//! Append-only conversation state.
//!
//! [`Conversation`] holds the three pieces of mutable state a chat session
//! needs: the message history, the uncommitted draft, and the awaiting-reply
//! flag. The struct enforces the history invariants itself (there is no API
//! to remove, replace, or reorder an appended message); the submission and
//! reply lifecycle is orchestrated by the controller that owns it.

use serde::{Deserialize, Serialize};

use crate::message::Message;

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// The full client-side state of one chat session.
///
/// Created empty, or pre-seeded with a greeting message for the static
/// variant. Discarded on teardown; there is no cross-session durability.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Conversation {
    /// Ordered, append-only message history.
    history: Vec<Message>,
    /// Current uncommitted input text.
    draft: String,
    /// True strictly between a submission and its reply resolution.
    awaiting_reply: bool,
}

impl Conversation {
    /// An empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation pre-seeded with a single greeting message.
    pub fn with_greeting(greeting: Message) -> Self {
        Self {
            history: vec![greeting],
            draft: String::new(),
            awaiting_reply: false,
        }
    }

    /// The message history, in insertion order.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Number of messages in the history.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the history holds no messages.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Append a message to the history.
    ///
    /// Appending is the only way the history changes; messages are never
    /// mutated, removed, or reordered afterwards.
    pub fn append(&mut self, message: Message) {
        self.history.push(message);
    }

    /// The current draft text, verbatim.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft wholesale with new input text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Clear the draft after a successful submission.
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Whether a reply is currently awaited.
    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Mark the start or end of a reply cycle.
    pub fn set_awaiting_reply(&mut self, awaiting: bool) {
        self.awaiting_reply = awaiting;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::{Participant, Role};

    #[test]
    fn starts_empty_and_idle() {
        let conv = Conversation::new();
        assert!(conv.is_empty());
        assert_eq!(conv.draft(), "");
        assert!(!conv.awaiting_reply());
    }

    #[test]
    fn greeting_seeds_one_message() {
        let greeting =
            Message::new("Hello my friend", Participant::named(Role::Bot, "Joe")).unwrap();
        let conv = Conversation::with_greeting(greeting.clone());
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.history()[0], greeting);
        assert!(!conv.awaiting_reply());
    }

    #[test]
    fn history_preserves_insertion_order() {
        let mut conv = Conversation::new();
        for text in ["one", "two", "three"] {
            conv.append(Message::new(text, Participant::user()).unwrap());
        }
        let texts: Vec<_> = conv.history().iter().map(Message::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn draft_replaced_wholesale() {
        let mut conv = Conversation::new();
        conv.set_draft("h");
        conv.set_draft("hi");
        assert_eq!(conv.draft(), "hi");
        conv.clear_draft();
        assert_eq!(conv.draft(), "");
    }

    #[test]
    fn conversation_serde_roundtrip() {
        let mut conv = Conversation::new();
        conv.append(Message::new("Hi", Participant::user()).unwrap());
        conv.set_draft("next");
        conv.set_awaiting_reply(true);
        let json = serde_json::to_string(&conv).unwrap();
        let back: Conversation = serde_json::from_str(&json).unwrap();
        assert_eq!(conv, back);
    }
}
