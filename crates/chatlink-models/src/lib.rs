#![deny(missing_docs)]

//! # Chatlink Models
//!
//! Core data types for the chatlink conversation client.
//!
//! ## Type hierarchy
//!
//! ```text
//! Conversation
//! ├── history: [Message]
//! │   ├── sender: Participant { Role, display name }
//! │   └── avatar: AvatarRef (opaque)
//! ├── draft
//! └── awaiting_reply
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`participant`] | Participant identity (`Role`, `Participant`, `AvatarRef`) |
//! | [`message`] | Immutable `Message` entries |
//! | [`conversation`] | Append-only `Conversation` state |
//! | [`error`] | Model-level error type |

pub mod conversation;
pub mod error;
pub mod message;
pub mod participant;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `chatlink_models::Message` directly.
pub use conversation::*;
pub use error::*;
pub use message::*;
pub use participant::*;
