//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. The controller absorbs all of them at its
//! boundary: a failed reply cycle ends with a log line, never with an
//! error surfaced into the conversation history.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad endpoint URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport failure, including malformed response bodies.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend error: {0}")]
    Backend(String),
}
