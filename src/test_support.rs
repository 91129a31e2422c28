//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::{ApiError, Message, Thread, ThreadId, ThreadStore};

/// A store that answers every call immediately with canned data.
pub struct StubStore {
    pub reply: Result<String, ApiError>,
    pub threads: Vec<Thread>,
}

impl StubStore {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            threads: Vec::new(),
        }
    }
}

#[async_trait]
impl ThreadStore for StubStore {
    fn name(&self) -> &str {
        "stub"
    }

    async fn send_message(&self, _thread_id: &ThreadId, _message: &str) -> Result<String, ApiError> {
        self.reply.clone()
    }

    async fn list_threads(&self) -> Result<Vec<Thread>, ApiError> {
        Ok(self.threads.clone())
    }

    async fn thread_history(&self, _thread_id: &ThreadId) -> Result<Vec<Message>, ApiError> {
        Ok(Vec::new())
    }

    async fn delete_thread(&self, _thread_id: &ThreadId) -> Result<(), ApiError> {
        Ok(())
    }
}
