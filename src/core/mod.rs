//! # Core Session Logic
//!
//! The conversation session controller. It knows nothing about terminals or
//! HTTP; it only decides what the session looks like after each event and
//! which I/O should happen next.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Effect (I/O orders)  │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │  runtime (tokio tasks,  │
//!                    │  reveal timer, store)   │
//!                    └───────────┬─────────────┘
//!                                │ Action
//!                                ▼
//!                          back to update()
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Session`, the single owner of mutable session state
//! - [`action`]: `Action`, `Effect`, and `update()`
//! - [`registry`]: thread list cache and active thread id
//! - [`request`]: single-flight send lifecycle
//! - [`reveal`]: word-by-word display of a finished reply
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod registry;
pub mod request;
pub mod reveal;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::{Phase, Session, SessionSnapshot};
