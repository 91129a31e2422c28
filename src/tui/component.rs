use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen.
///
/// Props arrive as struct fields; persistent presentation state (scroll
/// offsets, selection) lives in a separate `*State` struct that the
/// component borrows for the frame. `render` takes `&mut self` so that state
/// can be updated during the render pass, the same way ratatui's
/// `StatefulWidget` works.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns low-level terminal events into its own events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
