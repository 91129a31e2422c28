//! # Sidebar Component
//!
//! Thread list on the left of the screen. Focused with Tab.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` (selection, delete confirmation)
//! - `Sidebar` is created each frame with borrowed state and the thread list
//!
//! Keys while focused: ↑/↓ select, Enter open, `n` new chat, `d` twice delete.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::api::{Thread, ThreadId};
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Persistent state for the sidebar.
#[derive(Default)]
pub struct SidebarState {
    pub selected: usize,
    /// Thread armed by the first `d`. The second `d` only fires if the
    /// selection still points at this thread.
    pub confirm_delete: Option<ThreadId>,
    pub list_state: ListState,
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    Open(ThreadId),
    NewChat,
    Delete(ThreadId),
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside the list after it was refreshed.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Handle a key event against the current thread list.
    pub fn handle_event(&mut self, event: &TuiEvent, threads: &[Thread]) -> Option<SidebarEvent> {
        // Any key other than `d` disarms a pending delete.
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = None;
        }

        match event {
            TuiEvent::CursorUp => {
                if !threads.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !threads.is_empty() {
                    self.selected = (self.selected + 1).min(threads.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => threads
                .get(self.selected)
                .map(|thread| SidebarEvent::Open(thread.id.clone())),
            TuiEvent::InputChar('n') => Some(SidebarEvent::NewChat),
            TuiEvent::InputChar('d') => {
                let thread = threads.get(self.selected)?;
                if self.confirm_delete.take().as_ref() == Some(&thread.id) {
                    Some(SidebarEvent::Delete(thread.id.clone()))
                } else {
                    // Nothing armed, or the list moved under the selection.
                    self.confirm_delete = Some(thread.id.clone());
                    None
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    pub state: &'a mut SidebarState,
    pub threads: &'a [Thread],
    pub active: &'a ThreadId,
    pub focused: bool,
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.clamp(self.threads.len());

        let help_text = if self.state.confirm_delete.is_some() {
            " d again to delete "
        } else if self.focused {
            " n New  d Delete  ⏎ Open "
        } else {
            " Tab to browse "
        };

        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Threads ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.threads.is_empty() {
            let empty = Paragraph::new("No threads yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .threads
            .iter()
            .enumerate()
            .map(|(i, thread)| {
                let is_active = &thread.id == self.active;
                let marker = if is_active { "● " } else { "  " };
                let title = truncate_str(&thread.title, inner_width.saturating_sub(2));

                let mut style = if is_active {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if self.focused && i == self.state.selected {
                    style = if self.state.confirm_delete.as_ref() == Some(&thread.id) {
                        style.fg(Color::Red).add_modifier(Modifier::REVERSED)
                    } else {
                        style.add_modifier(Modifier::REVERSED)
                    };
                }

                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(title, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    let count = s.chars().count();
    if count <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}
