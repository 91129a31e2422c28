use std::fmt;

use async_trait::async_trait;

use super::types::{Message, Thread, ThreadId};

/// Errors that can occur talking to the thread service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never got a response (DNS, connection refused, timeout).
    Transport(String),
    /// The server answered with a non-success status.
    Response { status: u16, message: String },
    /// The body could not be decoded into the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Response { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Remote persistence for threads and their messages.
///
/// Every call is independent; the client never cancels one once issued.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Returns a short name for logging.
    fn name(&self) -> &str;

    /// Sends `message` on `thread_id` and returns the assistant's reply.
    /// The server persists both turns before answering.
    async fn send_message(&self, thread_id: &ThreadId, message: &str) -> Result<String, ApiError>;

    /// All known threads, in server order.
    async fn list_threads(&self) -> Result<Vec<Thread>, ApiError>;

    /// Full history of one thread, oldest first.
    async fn thread_history(&self, thread_id: &ThreadId) -> Result<Vec<Message>, ApiError>;

    async fn delete_thread(&self, thread_id: &ThreadId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            ApiError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
        assert_eq!(
            ApiError::Response {
                status: 500,
                message: "boom".into()
            }
            .to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(
            ApiError::Parse("missing field `reply`".into()).to_string(),
            "parse error: missing field `reply`"
        );
    }
}
