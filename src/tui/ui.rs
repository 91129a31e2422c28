use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::{Phase, SessionSnapshot};
use crate::tui::component::Component;
use crate::tui::components::input_box;
use crate::tui::components::{LandingPage, MessageList, Sidebar, TitleBar};
use crate::tui::{Focus, TuiState};

/// Width of the thread list column.
const SIDEBAR_WIDTH: u16 = 32;

/// Draw one frame from the session snapshot.
///
/// ```text
/// ┌ Threads ──────┐ Nexus | title | status
/// │ ● Thread one  │ ╭ you ───────────────╮
/// │   Thread two  │ ╰────────────────────╯
/// │               │ ╭ Input ─────────────╮
/// └───────────────┘ ╰────────────────────╯
/// ```
pub fn draw_ui(frame: &mut Frame, snapshot: &SessionSnapshot, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH.min(frame.area().width / 3)), Min(0)])
            .areas(frame.area());
    let [title_area, body_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_box::HEIGHT)]).areas(main_area);

    Sidebar {
        state: &mut tui.sidebar,
        threads: snapshot.threads,
        active: snapshot.active_thread,
        focused: tui.focus == Focus::Sidebar,
    }
    .render(frame, sidebar_area);

    TitleBar::new(
        snapshot.active_title.map(str::to_string),
        snapshot.status_message.to_string(),
    )
    .render(frame, title_area);

    if snapshot.phase == Phase::Empty && !snapshot.history_loading {
        LandingPage.render(frame, body_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            snapshot.messages,
            snapshot.reveal,
            snapshot.busy_here,
            snapshot.history_loading,
        )
        .render(frame, body_area);
    }

    tui.input_box.enabled = snapshot.input_enabled;
    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ThreadId;
    use crate::core::{Action, Session, update};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(session: &Session, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, &session.snapshot(), tui))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_fresh_session_shows_landing() {
        let session = Session::new();
        let mut tui = TuiState::new();
        let text = rendered(&session, &mut tui);
        assert!(text.contains("Start a New Chat!"));
        assert!(text.contains("Nexus | New chat | Welcome to Nexus!"));
        assert!(text.contains("No threads yet."));
    }

    #[test]
    fn test_pending_send_disables_input_and_hides_landing() {
        let mut session = Session::new();
        update(&mut session, Action::EditDraft("Hello".into()));
        update(&mut session, Action::Submit);
        let mut tui = TuiState::new();
        let text = rendered(&session, &mut tui);
        assert!(text.contains("Thinking..."));
        assert!(text.contains("disabled while waiting"));
        assert!(!text.contains("Start a New Chat!"));
    }

    #[test]
    fn test_switching_shows_loading_placeholder() {
        let mut session = Session::new();
        update(&mut session, Action::SwitchThread(ThreadId::new("t1")));
        let mut tui = TuiState::new();
        let text = rendered(&session, &mut tui);
        assert!(text.contains("Loading thread..."));
        assert!(text.contains("disabled while waiting"));
        assert!(!text.contains("Start a New Chat!"));
    }
}
