//! # Chatlink SDK
//!
//! Client-side conversation logic for the **chatlink** chat interface.
//!
//! The SDK provides:
//!
//! * [`ConversationController`] — the state machine that owns the
//!   conversation, accepts draft edits and submissions, and integrates
//!   asynchronous bot replies.
//! * [`ReplySource`] — the one-operation capability that produces a bot
//!   reply for a submitted user text.
//! * [`HttpReplySource`] — reply source backed by the backend's
//!   `GET /search?message=…` endpoint.
//! * [`CannedReplySource`] — local static-data reply source for running
//!   without a backend.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chatlink_sdk::{ConversationController, HttpReplySource, ReplyOutcome};
//! use tokio::sync::mpsc;
//!
//! # async fn run() {
//! let (tx, mut rx) = mpsc::unbounded_channel::<ReplyOutcome>();
//! let source = Arc::new(HttpReplySource::new("http://localhost:5000"));
//! let mut controller = ConversationController::new(Some(source), tx);
//!
//! controller.update_draft("Hi");
//! controller.submit();
//!
//! // The owning event loop feeds resolutions back into the controller.
//! if let Some(outcome) = rx.recv().await {
//!     controller.on_reply_resolved(outcome);
//! }
//! # }
//! ```

pub mod canned;
pub mod client;
pub mod controller;
pub mod error;
pub mod source;

pub use canned::CannedReplySource;
pub use client::HttpReplySource;
pub use controller::{ConversationController, ReplyOutcome};
pub use error::SdkError;
pub use source::ReplySource;

// Re-export the model types most callers need alongside the controller.
pub use chatlink_models::{Conversation, Message, Participant, Role};
