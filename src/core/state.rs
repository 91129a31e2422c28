//! # Session State
//!
//! All mutable client state in one place. Only [`update`](super::action::update)
//! writes to it; the display layer reads through [`Session::snapshot`].
//!
//! ```text
//! Session
//! ├── registry: ThreadRegistry      // thread list + active thread id
//! ├── requests: RequestController   // the single in-flight send
//! ├── reveal: RevealEngine          // progressive display of the latest reply
//! ├── messages: Vec<Message>        // history of the active thread only
//! ├── draft: String                 // unsent input
//! ├── is_new_thread: bool           // active id not yet known to the server
//! ├── history_loading: bool         // waiting for the active thread's history
//! ├── history_during_send: bool     // history landed while its thread had a send in flight
//! └── status_message: String        // title bar text
//! ```

use crate::api::{Message, Thread, ThreadId};
use crate::core::registry::ThreadRegistry;
use crate::core::request::{PendingRequest, RequestController};
use crate::core::reveal::{RevealEngine, RevealView};

/// Display state of the active thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh thread, nothing typed, nothing sent.
    Empty,
    /// Draft present, nothing pending for this thread.
    Composing,
    /// The in-flight request belongs to this thread.
    AwaitingReply,
    /// Reply received, reveal timer running.
    Revealing,
    /// Everything on screen is fully shown.
    Settled,
}

pub struct Session {
    pub(super) registry: ThreadRegistry,
    pub(super) requests: RequestController,
    pub(super) reveal: RevealEngine,
    pub(super) messages: Vec<Message>,
    pub(super) draft: String,
    pub(super) is_new_thread: bool,
    pub(super) history_loading: bool,
    pub(super) history_during_send: bool,
    pub(super) status_message: String,
}

/// Read-only view handed to the display layer each frame.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub active_thread: &'a ThreadId,
    pub active_title: Option<&'a str>,
    pub threads: &'a [Thread],
    pub messages: &'a [Message],
    pub draft: &'a str,
    pub is_new_thread: bool,
    pub phase: Phase,
    /// Show a busy indicator for the thread on screen.
    pub busy_here: bool,
    /// Whether the input control accepts edits and submits.
    pub input_enabled: bool,
    pub history_loading: bool,
    pub reveal: RevealView<'a>,
    pub status_message: &'a str,
}

impl Session {
    pub fn new() -> Self {
        Self {
            registry: ThreadRegistry::new(),
            requests: RequestController::new(),
            reveal: RevealEngine::new(),
            messages: Vec::new(),
            draft: String::new(),
            is_new_thread: true,
            history_loading: false,
            history_during_send: false,
            status_message: String::from("Welcome to Nexus!"),
        }
    }

    pub fn active_thread(&self) -> &ThreadId {
        self.registry.active()
    }

    pub fn threads(&self) -> &[Thread] {
        self.registry.threads()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_new_thread(&self) -> bool {
        self.is_new_thread
    }

    pub fn pending_request(&self) -> Option<&PendingRequest> {
        self.requests.pending()
    }

    pub fn is_loading(&self) -> bool {
        self.requests.is_loading()
    }

    /// Edits and submits are accepted only when nothing is in flight and
    /// the active thread's history is not still on its way.
    pub fn accepts_input(&self) -> bool {
        !self.requests.is_loading() && !self.history_loading
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn phase(&self) -> Phase {
        if self.requests.is_pending_for(self.registry.active()) {
            Phase::AwaitingReply
        } else if self.reveal.is_revealing() {
            Phase::Revealing
        } else if !self.draft.trim().is_empty() {
            Phase::Composing
        } else if self.is_new_thread && self.messages.is_empty() {
            Phase::Empty
        } else {
            Phase::Settled
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            active_thread: self.registry.active(),
            active_title: self.registry.active_title(),
            threads: self.registry.threads(),
            messages: &self.messages,
            draft: &self.draft,
            is_new_thread: self.is_new_thread,
            phase: self.phase(),
            busy_here: self.requests.is_pending_for(self.registry.active()),
            input_enabled: self.accepts_input(),
            history_loading: self.history_loading,
            reveal: self.reveal.view(),
            status_message: &self.status_message,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
