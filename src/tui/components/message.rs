use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::api::Role;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat turn.
///
/// `content` is whatever should be visible right now, which for the latest
/// assistant turn during a reveal is only a prefix of the stored message.
/// The parent `MessageList` decides that; this component just draws it.
///
/// User turns are green, assistant turns blue. A turn still being revealed
/// keeps a bright border; settled turns get a dim one.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub role: Role,
    pub content: &'a str,
    /// True while this turn is still being revealed
    pub is_live: bool,
}

impl<'a> Message<'a> {
    pub fn new(role: Role, content: &'a str, is_live: bool) -> Self {
        Self {
            role,
            content,
            is_live,
        }
    }

    /// Predict the rendered height for `content` at `width` without rendering.
    ///
    /// The wrapping options must match ratatui's `Paragraph` wrapping so the
    /// scroll canvas is sized exactly.
    pub fn calculate_height(content: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let content = content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub(crate) fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "nexus",
    }
}

pub(crate) fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
    }
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.role);
        let border_style = if self.is_live {
            style.add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(role_label(self.role))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.content.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl Component for Message<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        assert_eq!(Message::calculate_height("", 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_whitespace_only_treated_as_empty() {
        assert_eq!(Message::calculate_height("   \n\t  ", 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        assert_eq!(Message::calculate_height("Hello world", 0), 1);
        assert_eq!(Message::calculate_height("Hello world", HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_single_line_fits() {
        assert_eq!(Message::calculate_height("Hello", 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        // content_width = 9 - 4 = 5 → "Hello" | "world"
        assert_eq!(Message::calculate_height("Hello world", 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        // content_width = 4 → "abcd" | "efgh" | "ij"
        assert_eq!(Message::calculate_height("abcdefghij", 8), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn role_styles_differ() {
        assert_eq!(role_style(Role::User).fg, Some(Color::Green));
        assert_eq!(role_style(Role::Assistant).fg, Some(Color::Blue));
    }

    #[test]
    fn renders_label_and_content() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                let mut message = Message::new(Role::Assistant, "The quick", true);
                Component::render(&mut message, f, area);
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("nexus"));
        assert!(text.contains("The quick"));
    }
}
