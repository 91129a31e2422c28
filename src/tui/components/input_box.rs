//! # InputBox Component
//!
//! Single-line prompt editor at the bottom of the chat pane.
//!
//! ## Responsibilities
//!
//! - Capture text input and paste
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter)
//! - Refuse all of the above while a request is in flight
//!
//! ## State Management
//!
//! The buffer mirrors the session's draft. Every edit is reported upward as
//! `InputEvent::Changed` so the session stays authoritative; after each
//! update the parent calls [`InputBox::sync`] so a cleared or rejected draft
//! shows up here too. `enabled` is a prop copied from the snapshot.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Offset from area edge to content (border + padding)
const CONTENT_OFFSET: u16 = 2;
/// Bordered single line
pub const HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Buffer content changed; carries the full new text
    Changed(String),
    /// Enter pressed on a non-blank buffer
    Submit,
}

/// Text input component.
///
/// # Props
///
/// - `enabled`: false while any request is pending
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Byte offset into `buffer`
/// - `scroll`: Display columns hidden off the left edge
pub struct InputBox {
    pub buffer: String,
    pub enabled: bool,
    cursor: usize,
    scroll: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            enabled: true,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Adopt the session's draft if it differs from the buffer.
    pub fn sync(&mut self, draft: &str) {
        if self.buffer != draft {
            self.buffer = draft.to_string();
            self.cursor = self.buffer.len();
            self.scroll = 0;
        }
    }

    /// Display column of the cursor from the start of the buffer.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Slide the viewport so the cursor stays inside `inner_width` columns.
    fn update_scroll(&mut self, inner_width: u16) {
        let column = self.cursor_column();
        if column < self.scroll {
            self.scroll = column;
        } else if inner_width > 0 && column >= self.scroll + inner_width {
            self.scroll = column + 1 - inner_width;
        }
    }

    /// The part of the buffer that starts at `self.scroll` columns.
    fn visible_text(&self) -> &str {
        let mut skipped = 0u16;
        for (i, c) in self.buffer.char_indices() {
            if skipped >= self.scroll {
                return &self.buffer[i..];
            }
            skipped += c.width().unwrap_or(0) as u16;
        }
        ""
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.buffer.clone()))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.update_scroll(inner_width);

        let (title, style) = if self.enabled {
            ("Input", Style::default().fg(Color::Green))
        } else {
            (
                "Input (disabled while waiting)",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(title)
            .padding(Padding::horizontal(1));

        let input = Paragraph::new(self.visible_text()).block(block).style(style);
        frame.render_widget(input, area);

        if self.enabled {
            let x = area.x + CONTENT_OFFSET + self.cursor_column().saturating_sub(self.scroll).min(inner_width);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !self.enabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &flat);
                self.cursor += flat.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                let prev = self.buffer[..self.cursor].char_indices().next_back()?.0;
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.changed()
            }
            TuiEvent::Delete => {
                let c = self.buffer[self.cursor..].chars().next()?;
                self.buffer.drain(self.cursor..self.cursor + c.len_utf8());
                self.changed()
            }
            TuiEvent::CursorLeft => {
                let prev = self.buffer[..self.cursor].char_indices().next_back()?.0;
                self.cursor = prev;
                None
            }
            TuiEvent::CursorRight => {
                let c = self.buffer[self.cursor..].chars().next()?;
                self.cursor += c.len_utf8();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => (!self.buffer.trim().is_empty()).then_some(InputEvent::Submit),
            _ => None,
        }
    }
}
