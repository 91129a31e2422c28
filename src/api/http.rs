//! HTTP implementation of [`ThreadStore`] against the chat backend.
//!
//! Endpoints (JSON over HTTP):
//! - `POST   /api/chat`         `{message, threadId}` → `{reply}`
//! - `GET    /api/thread`       → `[{threadId, title, ...}]`
//! - `GET    /api/thread/{id}`  → `[{role, content}]`
//! - `DELETE /api/thread/{id}`  → acknowledgement (body ignored)

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use super::store::{ApiError, ThreadStore};
use super::types::{ChatReply, ChatRequest, Message, Thread, ThreadId};

pub struct HttpThreadStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpThreadStore {
    /// `timeout` of `None` means a request may hang indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        });

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Build `{base_url}/seg/seg/...`, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Transport(format!("invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Map a non-2xx response to `ApiError::Response`, keeping the body for the log.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("Thread service error: {} - {}", status, message);
    Err(ApiError::Response { status, message })
}

/// Read the full body, then decode it. A body that fails to arrive is a
/// transport failure; one that arrives but doesn't fit `T` is a parse failure.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl ThreadStore for HttpThreadStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn send_message(&self, thread_id: &ThreadId, message: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["api", "chat"])?;
        info!("POST {} (thread={}, {} bytes)", url, thread_id, message.len());

        let response = self
            .client
            .post(url)
            .json(&ChatRequest { message, thread_id })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!("Chat response status: {}", response.status());
        let reply: ChatReply = decode(check_status(response).await?).await?;
        Ok(reply.reply)
    }

    async fn list_threads(&self) -> Result<Vec<Thread>, ApiError> {
        let url = self.endpoint(&["api", "thread"])?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(check_status(response).await?).await
    }

    async fn thread_history(&self, thread_id: &ThreadId) -> Result<Vec<Message>, ApiError> {
        let url = self.endpoint(&["api", "thread", thread_id.as_str()])?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(check_status(response).await?).await
    }

    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "thread", thread_id.as_str()])?;
        info!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = check_status(response).await?;
        if let Ok(ack) = response.text().await {
            debug!("Delete acknowledged: {}", ack);
        }
        Ok(())
    }
}
