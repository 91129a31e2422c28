//! # Reveal Engine
//!
//! Presents an already-complete reply as if it were arriving word by word.
//! There is no streaming transport behind it: the full text is known up front
//! and a fixed-cadence timer advances a growing prefix.
//!
//! ```text
//!            start(reply)            advance() x N
//! Inactive ───────────────► Revealing ──────────────► Complete
//!    ▲        (empty reply) ─────────────────────────────▲
//!    └──────────── cancel() ◄── any state
//! ```
//!
//! The engine owns no timer. Each `start` bumps a generation counter and hands
//! back a [`RevealTicket`]; the runtime drives `advance(generation)` from its
//! timer, and ticks carrying an old generation are ignored.

use std::time::Duration;

/// Default cadence between revealed units.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(40);

/// Lazy sequence of growing prefixes of `text`, one per whitespace-delimited
/// unit. Each prefix is a slice of the original, so inner whitespace is kept
/// exactly. Cloning restarts from the same point.
#[derive(Debug, Clone)]
pub struct Prefixes<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Prefixes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        let start = rest.find(|c: char| !c.is_whitespace())?;
        let len = rest[start..]
            .find(char::is_whitespace)
            .unwrap_or(rest.len() - start);
        self.pos += start + len;
        Some(&self.text[..self.pos])
    }
}

pub fn prefixes(text: &str) -> Prefixes<'_> {
    Prefixes { text, pos: 0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Nothing is being revealed; messages display in full.
    Inactive,
    /// A timer is advancing the prefix.
    Revealing,
    /// The last prefix has been shown. No more ticks are expected.
    Complete,
}

/// What the display layer should show for the latest assistant message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealView<'a> {
    NotApplicable,
    Partial(&'a str),
    Full,
}

/// Returned by `start` when a timer is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTicket {
    pub generation: u64,
    /// Number of ticks until the reveal is complete.
    pub steps: usize,
}

#[derive(Debug)]
pub struct RevealEngine {
    text: String,
    shown: usize,
    steps_taken: usize,
    total_steps: usize,
    phase: RevealPhase,
    generation: u64,
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealEngine {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            shown: 0,
            steps_taken: 0,
            total_steps: 0,
            phase: RevealPhase::Inactive,
            generation: 0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_revealing(&self) -> bool {
        self.phase == RevealPhase::Revealing
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RevealPhase::Complete
    }

    /// Begin revealing `reply`, superseding anything already in progress.
    ///
    /// Returns `None` when the reply has no units; the engine is then
    /// already complete and no timer should be started.
    pub fn start(&mut self, reply: &str) -> Option<RevealTicket> {
        self.generation += 1;
        self.text = reply.to_string();
        self.shown = 0;
        self.steps_taken = 0;
        self.total_steps = prefixes(reply).count();

        if self.total_steps == 0 {
            self.phase = RevealPhase::Complete;
            return None;
        }
        self.phase = RevealPhase::Revealing;
        Some(RevealTicket {
            generation: self.generation,
            steps: self.total_steps,
        })
    }

    /// Show one more unit. Returns false for stale or post-completion ticks.
    pub fn advance(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != RevealPhase::Revealing {
            return false;
        }
        let mut rest = Prefixes {
            text: &self.text,
            pos: self.shown,
        };
        match rest.next() {
            Some(prefix) => {
                self.shown = prefix.len();
                self.steps_taken += 1;
            }
            None => self.steps_taken = self.total_steps,
        }
        if self.steps_taken >= self.total_steps {
            self.phase = RevealPhase::Complete;
        }
        true
    }

    /// Abandon the current reveal. Any ticks still queued become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.text.clear();
        self.shown = 0;
        self.steps_taken = 0;
        self.total_steps = 0;
        self.phase = RevealPhase::Inactive;
    }

    pub fn view(&self) -> RevealView<'_> {
        match self.phase {
            RevealPhase::Inactive => RevealView::NotApplicable,
            RevealPhase::Revealing => RevealView::Partial(&self.text[..self.shown]),
            RevealPhase::Complete => RevealView::Full,
        }
    }
}
