//! HTTP reply source for the backend search endpoint.
//!
//! The backend exposes a single read-type endpoint: `GET /search` with the
//! submitted user text in the `message` query parameter, answering with a
//! JSON body whose `message` field is the bot's reply. There is no retry
//! and no auth; a failed request means the turn gets no reply.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SdkError;
use crate::source::ReplySource;

/// Reply source that queries the backend over HTTP.
///
/// # Typical usage
///
/// ```rust,no_run
/// use chatlink_sdk::{HttpReplySource, ReplySource};
///
/// # async fn run() -> Result<(), chatlink_sdk::SdkError> {
/// let source = HttpReplySource::new("http://localhost:5000");
/// let reply = source.fetch_reply("what is food insecurity?").await?;
/// println!("{reply}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpReplySource {
    http: reqwest::Client,
    endpoint: String,
}

// ---------------------------------------------------------------------------
// Wire DTO
// ---------------------------------------------------------------------------

/// Body of the backend's `GET /search` response.
#[derive(Deserialize)]
struct SearchResponse {
    /// Reply text to show as the bot's message.
    message: String,
}

impl HttpReplySource {
    /// Create a reply source for the given backend base URL.
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// The backend base URL this source queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReplySource for HttpReplySource {
    async fn fetch_reply(&self, text: &str) -> Result<String, SdkError> {
        let res = self
            .http
            .get(format!("{}/search", self.endpoint))
            .query(&[("message", text)])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(SdkError::Backend(format!("{status}: {body}")));
        }

        let body: SearchResponse = res.json().await?;
        Ok(body.message)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Bind a throwaway backend on a random port and return its base URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn echo_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let text = params.get("message").cloned().unwrap_or_default();
        Json(json!({ "message": format!("you said: {text}") }))
    }

    #[tokio::test]
    async fn fetch_reply_sends_message_param_and_reads_reply() {
        let base = spawn_backend(Router::new().route("/search", get(echo_search))).await;
        let source = HttpReplySource::new(&base);
        let reply = source.fetch_reply("Hi").await.unwrap();
        assert_eq!(reply, "you said: Hi");
    }

    #[tokio::test]
    async fn non_success_status_is_a_backend_error() {
        let app = Router::new().route(
            "/search",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "index not loaded") }),
        );
        let base = spawn_backend(app).await;
        let source = HttpReplySource::new(&base);
        let err = source.fetch_reply("Hi").await.unwrap_err();
        match err {
            SdkError::Backend(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("index not loaded"));
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_http_error() {
        let app = Router::new().route("/search", get(|| async { "not json" }));
        let base = spawn_backend(app).await;
        let source = HttpReplySource::new(&base);
        let err = source.fetch_reply("Hi").await.unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_http_error() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpReplySource::new(&format!("http://{addr}"));
        let err = source.fetch_reply("Hi").await.unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
    }

    #[test]
    fn endpoint_trailing_slash_is_normalised() {
        let source = HttpReplySource::new("http://localhost:5000/");
        assert_eq!(source.endpoint(), "http://localhost:5000");
    }
}
