//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as fields:
//! - `TitleBar`: app name, active thread title, status message
//! - `Message`: one chat turn
//! - `LandingPage`: empty state for a fresh thread
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state across frames and emit events:
//! - `InputBox`: prompt editor mirroring the session draft
//! - `MessageList`: scrollable conversation view
//! - `Sidebar`: thread list with selection and delete confirmation
//!
//! Stateful components never touch the session. They emit events that the
//! parent turns into `core::Action`s.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status bar)
//! ├── message.rs       (single message renderer)
//! ├── message_list.rs  (scrollable message container)
//! ├── input_box.rs     (prompt editor)
//! ├── sidebar.rs       (thread list)
//! └── landing.rs       (empty state)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod landing;
pub use landing::LandingPage;
pub mod sidebar;
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
