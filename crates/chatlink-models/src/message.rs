//! Immutable conversation messages.
//!
//! A [`Message`] is created once and never mutated afterwards: all fields are
//! private and exposed through accessors only. The time label is captured at
//! creation, matching what the view eventually renders next to the bubble.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::participant::{AvatarRef, Participant, Role};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One entry in a conversation's history.
///
/// # Examples
///
/// ```
/// use chatlink_models::{Message, Participant};
///
/// let msg = Message::new("  Hi  ", Participant::user()).unwrap();
/// assert_eq!(msg.text(), "Hi");
/// assert!(msg.is_outgoing());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    /// Unique message identifier (UUID v4).
    id: Uuid,
    /// Trimmed, non-empty message body.
    text: String,
    /// Author of the message.
    sender: Participant,
    /// Human-readable time label (`HH:MM:SS`, UTC) captured at creation.
    timestamp: String,
    /// Opaque avatar reference for the view, if any.
    avatar: Option<AvatarRef>,
}

impl Message {
    /// Create a message from raw text, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyText`] when the text is empty after
    /// trimming.
    pub fn new(text: &str, sender: Participant) -> Result<Self, ModelError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ModelError::EmptyText);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            sender,
            timestamp: Utc::now().format("%H:%M:%S").to_string(),
            avatar: None,
        })
    }

    /// Attach an avatar reference.
    #[must_use]
    pub fn with_avatar(mut self, avatar: AvatarRef) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Unique message id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The trimmed message body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The message author.
    pub fn sender(&self) -> &Participant {
        &self.sender
    }

    /// The time label captured when the message was created.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The avatar reference, if one was attached.
    pub fn avatar(&self) -> Option<&AvatarRef> {
        self.avatar.as_ref()
    }

    /// Whether a view should render this message as outgoing.
    ///
    /// Direction is derived from the sender's role, not its display name.
    pub fn is_outgoing(&self) -> bool {
        self.sender.role == Role::User
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
