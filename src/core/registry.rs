//! # Thread Registry
//!
//! Local cache of the thread list plus the identity of the active thread.
//! The list is replaced wholesale on every refresh; titles are owned by the
//! server and may change between refreshes.

use crate::api::{Thread, ThreadId};

#[derive(Debug, Clone)]
pub struct ThreadRegistry {
    threads: Vec<Thread>,
    active: ThreadId,
}

impl ThreadRegistry {
    /// Starts with an empty cache and a freshly allocated draft id.
    pub fn new() -> Self {
        Self {
            threads: Vec::new(),
            active: ThreadId::generate(),
        }
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn active(&self) -> &ThreadId {
        &self.active
    }

    pub fn is_active(&self, id: &ThreadId) -> bool {
        &self.active == id
    }

    #[cfg(test)]
    pub fn contains(&self, id: &ThreadId) -> bool {
        self.threads.iter().any(|t| &t.id == id)
    }

    /// Title of the active thread, if the server knows about it yet.
    pub fn active_title(&self) -> Option<&str> {
        self.threads
            .iter()
            .find(|t| t.id == self.active)
            .map(|t| t.title.as_str())
    }

    /// Replace the cache with a fresh server listing.
    pub fn replace(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
    }

    /// Allocate a new draft id and make it active. No remote call.
    pub fn create_draft(&mut self) -> &ThreadId {
        self.active = ThreadId::generate();
        &self.active
    }

    pub fn set_active(&mut self, id: ThreadId) {
        self.active = id;
    }

    /// Drop `id` from the cache. Returns true if it was the active thread,
    /// in which case a fresh draft id has already been made active.
    pub fn remove(&mut self, id: &ThreadId) -> bool {
        self.threads.retain(|t| &t.id != id);
        if self.is_active(id) {
            self.create_draft();
            true
        } else {
            false
        }
    }
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self::new()
    }
}
