//! Participant identity types.
//!
//! A conversation has exactly two sides: the local user and the remote bot.
//! Identity (the [`Role`]) is kept separate from presentation (the display
//! name and the [`AvatarRef`]), so a renamed participant is still the same
//! side of the conversation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Which side of the conversation a participant is on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// The local user typing into the input surface.
    User,
    /// The remote reply-producing participant.
    Bot,
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// A message author: a [`Role`] plus a presentation-only display name.
///
/// # Examples
///
/// ```
/// use chatlink_models::{Participant, Role};
///
/// let you = Participant::user();
/// assert_eq!(you.role, Role::User);
/// assert_eq!(you.display_name, "You");
///
/// let joe = Participant::named(Role::Bot, "Joe");
/// assert_eq!(joe.to_string(), "Joe");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Conversation side this participant belongs to.
    pub role: Role,
    /// Name shown next to the participant's messages.
    pub display_name: String,
}

impl Participant {
    /// The local user with the default `"You"` display name.
    pub fn user() -> Self {
        Self::named(Role::User, "You")
    }

    /// The remote bot with the default `"Bot"` display name.
    pub fn bot() -> Self {
        Self::named(Role::Bot, "Bot")
    }

    /// A participant with an arbitrary display name.
    pub fn named(role: Role, display_name: &str) -> Self {
        Self {
            role,
            display_name: display_name.to_string(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

// ---------------------------------------------------------------------------
// AvatarRef
// ---------------------------------------------------------------------------

/// Opaque display reference for a participant's avatar.
///
/// The conversation logic never interprets the contents; a view may treat it
/// as an image path, a URL, or anything else.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarRef(String);

impl AvatarRef {
    /// Create a new avatar reference.
    pub fn new(reference: &str) -> Self {
        Self(reference.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AvatarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AvatarRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AvatarRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AvatarRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
