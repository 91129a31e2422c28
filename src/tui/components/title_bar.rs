//! # TitleBar Component
//!
//! Single-line bar at the top of the chat pane: app name, the active
//! thread's title (or "New chat" for a draft), and the transient status
//! message.
//!
//! Stateless: all three values are props copied from the session snapshot
//! each frame.
//!
//! ```text
//! Nexus | Rust lifetimes explained | Thinking...
//! Nexus | New chat
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Server-assigned title, `None` while the thread is still a draft
    pub thread_title: Option<String>,
    /// Status message (e.g. "Thinking...", "Failed to load threads")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(thread_title: Option<String>, status_message: String) -> Self {
        Self {
            thread_title,
            status_message,
        }
    }

    fn text(&self) -> String {
        let title = self.thread_title.as_deref().unwrap_or("New chat");
        if self.status_message.is_empty() {
            format!("Nexus | {}", title)
        } else {
            format!("Nexus | {} | {}", title, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.text(), Style::default().fg(Color::Cyan)));
        frame.render_widget(line, area);
    }
}
