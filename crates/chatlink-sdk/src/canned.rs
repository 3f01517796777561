//! Static-data reply source.
//!
//! Stands in for the backend when running offline: replies are looked up
//! from a fixed keyword table instead of being fetched. Resolution is
//! immediate; the controller's display delay still applies.

use async_trait::async_trait;

use crate::error::SdkError;
use crate::source::ReplySource;

/// Reply source answering from a fixed keyword → reply table.
///
/// The first entry whose keyword occurs in the submitted text (case
/// insensitive) wins; otherwise the fallback line is returned. Lookup never
/// fails, mirroring the static variant's always-available behaviour.
pub struct CannedReplySource {
    replies: Vec<(String, String)>,
    fallback: String,
}

impl CannedReplySource {
    /// Create a source with the given fallback line and no keyword entries.
    pub fn new(fallback: &str) -> Self {
        Self {
            replies: Vec::new(),
            fallback: fallback.to_string(),
        }
    }

    /// Add a keyword → reply entry. Entries are matched in insertion order.
    #[must_use]
    pub fn with_reply(mut self, keyword: &str, reply: &str) -> Self {
        self.replies
            .push((keyword.to_lowercase(), reply.to_string()));
        self
    }
}

#[async_trait]
impl ReplySource for CannedReplySource {
    async fn fetch_reply(&self, text: &str) -> Result<String, SdkError> {
        let text = text.to_lowercase();
        let reply = self
            .replies
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map_or(&self.fallback, |(_, reply)| reply);
        Ok(reply.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
