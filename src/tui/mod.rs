//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each iteration draws a frame from `Session::snapshot()`, drains terminal
//! events into actions, then drains actions posted by background tasks.
//! Every action goes through `core::update()` and its effects straight into
//! the [`Runtime`].
//!
//! ## Redraw Strategy
//!
//! - **Busy** (request pending or reveal running): polls every ~30ms so
//!   reveal ticks show up promptly.
//! - **Idle**: sleeps up to 250ms and only redraws on events or on actions
//!   from background tasks.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info};
use tokio::sync::mpsc;

use crate::api::{HttpThreadStore, ThreadId};
use crate::core::config::ResolvedConfig;
use crate::core::{Action, Session, update};
use crate::runtime::Runtime;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, SidebarEvent, SidebarState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(30);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// TUI-specific presentation state (not part of core session logic)
pub struct TuiState {
    pub focus: Focus,
    pub sidebar: SidebarState,
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Input, // User expects to type immediately
            sidebar: SidebarState::new(),
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }

    /// Mirror the session's draft and input gate into the input box.
    fn sync_input(&mut self, session: &Session) {
        self.input_box.sync(session.draft());
        self.input_box.enabled = session.accepts_input();
    }

    /// Turn a terminal event into a session action, updating local
    /// presentation state on the way.
    fn handle_event(&mut self, event: &TuiEvent, session: &Session) -> Option<Action> {
        match event {
            TuiEvent::ForceQuit => return Some(Action::Quit),
            TuiEvent::NewChat => return Some(Action::NewThread),
            TuiEvent::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Input,
                    Focus::Input => Focus::Sidebar,
                };
                return None;
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                self.message_list.handle_event(event);
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => {
                if matches!(event, TuiEvent::Escape) {
                    self.focus = Focus::Input;
                    return None;
                }
                match self.sidebar.handle_event(event, session.threads())? {
                    SidebarEvent::Open(id) => {
                        self.focus = Focus::Input;
                        Some(Action::SwitchThread(id))
                    }
                    SidebarEvent::NewChat => {
                        self.focus = Focus::Input;
                        Some(Action::NewThread)
                    }
                    SidebarEvent::Delete(id) => Some(Action::DeleteThread(id)),
                }
            }
            Focus::Input => match self.input_box.handle_event(event)? {
                InputEvent::Changed(text) => Some(Action::EditDraft(text)),
                InputEvent::Submit => Some(Action::Submit),
            },
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that
        // don't support it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Apply one action and run its effects. Returns true when the app should exit.
fn dispatch(session: &mut Session, runtime: &mut Runtime, action: Action) -> bool {
    let effects = update(session, action);
    runtime.execute(effects)
}

/// Run the TUI until the user quits. Must be called inside a tokio runtime.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!(
        "Connecting to {} (timeout: {:?}, reveal every {:?})",
        config.base_url, config.request_timeout, config.reveal_interval
    );
    let store = Arc::new(HttpThreadStore::new(
        config.base_url.clone(),
        config.request_timeout,
    ));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runtime = Runtime::new(store, tx, config.reveal_interval);
    let mut session = Session::new();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut should_quit = dispatch(&mut session, &mut runtime, Action::RefreshThreads);
    let mut shown_thread: ThreadId = session.active_thread().clone();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        // A different thread on screen starts scrolled to the bottom.
        if session.active_thread() != &shown_thread {
            shown_thread = session.active_thread().clone();
            tui.message_list.reset();
        }
        tui.sync_input(&session);

        let busy = session.is_loading() || session.reveal().is_revealing();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &session.snapshot(), &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if busy { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = tui.handle_event(&event, &session) {
                debug!("Event loop dispatching {:?}", action);
                should_quit |= dispatch(&mut session, &mut runtime, action);
                tui.sync_input(&session);
            }
            if should_quit {
                break;
            }
        }

        // Handle background task results
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit = dispatch(&mut session, &mut runtime, action);
        }
    }

    info!("Shutting down");
    drop(runtime);
    ratatui::restore();
    Ok(())
}
