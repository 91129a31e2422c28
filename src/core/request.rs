//! # Request Controller
//!
//! Single-flight lifecycle for "send message". At most one request is in
//! flight across the whole session, and each one is tagged with the thread
//! it was issued for. The tag never changes, even if the user switches away
//! before the reply arrives.

use std::fmt;

use log::warn;

use crate::api::{ApiError, Message, ThreadId};

/// Assistant turn shown in place of a reply when the request fails for any reason.
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// The one in-flight send, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub for_thread: ThreadId,
    pub prompt: String,
}

/// Why `begin` refused to start a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejected {
    /// Prompt was empty or whitespace-only.
    EmptyPrompt,
    /// Another request is still in flight.
    AlreadyPending,
}

impl fmt::Display for SendRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendRejected::EmptyPrompt => write!(f, "prompt is empty"),
            SendRejected::AlreadyPending => write!(f, "a request is already in flight"),
        }
    }
}

impl std::error::Error for SendRejected {}

/// Raw result of a finished request, posted back by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub thread_id: ThreadId,
    pub prompt: String,
    pub result: Result<String, ApiError>,
}

/// A finished exchange with failures already normalized to [`ERROR_REPLY`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub thread_id: ThreadId,
    pub prompt: String,
    pub reply: String,
    pub failed: bool,
}

impl Exchange {
    /// The user turn followed by the assistant turn.
    pub fn into_messages(self) -> [Message; 2] {
        [Message::user(self.prompt), Message::assistant(self.reply)]
    }
}

#[derive(Debug, Default)]
pub struct RequestController {
    pending: Option<PendingRequest>,
}

impl RequestController {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a request is in flight. Gates the input control.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// True if the in-flight request belongs to `thread`.
    pub fn is_pending_for(&self, thread: &ThreadId) -> bool {
        self.pending.as_ref().is_some_and(|p| &p.for_thread == thread)
    }

    /// Start a request for `thread`. The prompt is trimmed before it is recorded.
    pub fn begin(&mut self, prompt: &str, thread: &ThreadId) -> Result<PendingRequest, SendRejected> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SendRejected::EmptyPrompt);
        }
        if self.pending.is_some() {
            return Err(SendRejected::AlreadyPending);
        }

        let request = PendingRequest {
            for_thread: thread.clone(),
            prompt: prompt.to_string(),
        };
        self.pending = Some(request.clone());
        Ok(request)
    }

    /// Clear the in-flight request and normalize its outcome.
    ///
    /// Returns `None` if the completion does not match the recorded request;
    /// the pending request is left untouched in that case.
    pub fn resolve(&mut self, completion: Completion) -> Option<Exchange> {
        let matches = self
            .pending
            .as_ref()
            .is_some_and(|p| p.for_thread == completion.thread_id && p.prompt == completion.prompt);
        if !matches {
            warn!(
                "Ignoring completion for thread {} with no matching pending request",
                completion.thread_id
            );
            return None;
        }
        self.pending = None;

        let (reply, failed) = match completion.result {
            Ok(reply) => (reply, false),
            Err(e) => {
                warn!("Send on thread {} failed: {}", completion.thread_id, e);
                (ERROR_REPLY.to_string(), true)
            }
        };

        Some(Exchange {
            thread_id: completion.thread_id,
            prompt: completion.prompt,
            reply,
            failed,
        })
    }
}
