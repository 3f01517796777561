//! The reply-producing capability.

use async_trait::async_trait;

use crate::error::SdkError;

/// Produces one bot reply for one submitted user text.
///
/// Implementations look synchronous to the caller but resolve
/// asynchronously, over the network ([`HttpReplySource`]) or from local
/// static data ([`CannedReplySource`]).
///
/// [`HttpReplySource`]: crate::client::HttpReplySource
/// [`CannedReplySource`]: crate::canned::CannedReplySource
#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Fetch the reply text for a submitted user text.
    ///
    /// # Errors
    ///
    /// Any transport, backend, or decoding failure. Callers treat every
    /// error the same way: the turn simply gets no reply.
    async fn fetch_reply(&self, text: &str) -> Result<String, SdkError>;
}
