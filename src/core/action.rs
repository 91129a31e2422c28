//! # Actions
//!
//! Everything that can happen in a session becomes an `Action`: user intents
//! (type, submit, new chat, switch, delete) and background completions
//! (reply arrived, thread list loaded, reveal timer ticked).
//!
//! `update()` applies one action to the [`Session`] and returns the
//! [`Effect`]s the runtime must perform. No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + [Effect]
//! ```
//!
//! Two races are settled here rather than in the runtime:
//! - a reply is only appended if its request was issued for the thread that
//!   is active when the reply lands; otherwise it is dropped from display
//!   (the server has already stored it);
//! - thread history is only applied if it belongs to the active thread.

use log::{debug, info, warn};

use crate::api::{ApiError, Message, Thread, ThreadId};
use crate::core::request::{Completion, PendingRequest};
use crate::core::reveal::RevealTicket;
use crate::core::state::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input text changed.
    EditDraft(String),
    /// Send the current draft on the active thread.
    Submit,
    /// Start a fresh, not-yet-persisted thread.
    NewThread,
    SwitchThread(ThreadId),
    DeleteThread(ThreadId),
    RefreshThreads,
    Quit,

    RequestResolved(Completion),
    ThreadsLoaded(Result<Vec<Thread>, ApiError>),
    HistoryLoaded {
        thread_id: ThreadId,
        result: Result<Vec<Message>, ApiError>,
    },
    ThreadDeleted {
        thread_id: ThreadId,
        result: Result<(), ApiError>,
    },
    RevealTick {
        generation: u64,
    },
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SendMessage(PendingRequest),
    FetchThreads,
    FetchHistory(ThreadId),
    DeleteRemote(ThreadId),
    /// Replace any running reveal timer with one for this ticket.
    StartReveal(RevealTicket),
    /// Release the reveal timer, if any.
    StopReveal,
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Vec<Effect> {
    match action {
        Action::EditDraft(text) => {
            if !session.accepts_input() {
                debug!("Draft edit ignored while a request or history load is in flight");
                return Vec::new();
            }
            session.draft = text;
            Vec::new()
        }

        Action::Submit => {
            if session.history_loading {
                debug!("Submit rejected: history for the active thread is still loading");
                return Vec::new();
            }
            let active = session.registry.active().clone();
            match session.requests.begin(&session.draft, &active) {
                Ok(request) => {
                    info!("Sending on thread {} ({} bytes)", active, request.prompt.len());
                    session.draft.clear();
                    session.status_message = String::from("Thinking...");
                    vec![Effect::SendMessage(request)]
                }
                Err(reason) => {
                    debug!("Submit rejected: {}", reason);
                    Vec::new()
                }
            }
        }

        Action::NewThread => {
            let id = session.registry.create_draft().clone();
            info!("New draft thread {}", id);
            session.draft.clear();
            session.status_message.clear();
            reset_view(session, true);
            vec![Effect::StopReveal, Effect::FetchThreads]
        }

        Action::SwitchThread(id) => {
            info!("Switching to thread {}", id);
            session.registry.set_active(id.clone());
            session.status_message.clear();
            reset_view(session, false);
            session.history_loading = true;
            vec![Effect::StopReveal, Effect::FetchHistory(id), Effect::FetchThreads]
        }

        Action::DeleteThread(id) => {
            info!("Deleting thread {}", id);
            vec![Effect::DeleteRemote(id)]
        }

        Action::RefreshThreads => vec![Effect::FetchThreads],

        Action::Quit => vec![Effect::Quit],

        Action::RequestResolved(completion) => {
            let Some(exchange) = session.requests.resolve(completion) else {
                return Vec::new();
            };
            session.status_message = if exchange.failed {
                String::from("Request failed")
            } else {
                String::new()
            };

            let history_during_send = std::mem::take(&mut session.history_during_send);
            let mut effects = vec![Effect::FetchThreads];
            if !session.registry.is_active(&exchange.thread_id) {
                info!(
                    "Reply for thread {} arrived after switching to {}; not displayed",
                    exchange.thread_id,
                    session.registry.active()
                );
                return effects;
            }

            session.is_new_thread = false;
            let reply = exchange.reply.clone();
            let turns = exchange.into_messages();
            // History fetched mid-send may already contain this exchange.
            if history_during_send && session.messages.ends_with(&turns) {
                debug!("Exchange already present in loaded history; not appending");
                return effects;
            }
            session.messages.extend(turns);
            match session.reveal.start(&reply) {
                Some(ticket) => effects.push(Effect::StartReveal(ticket)),
                None => effects.push(Effect::StopReveal),
            }
            effects
        }

        Action::ThreadsLoaded(Ok(threads)) => {
            debug!("Thread list refreshed: {} threads", threads.len());
            session.registry.replace(threads);
            Vec::new()
        }
        Action::ThreadsLoaded(Err(e)) => {
            warn!("Failed to refresh thread list, keeping cached list: {}", e);
            session.status_message = String::from("Failed to load threads");
            Vec::new()
        }

        Action::HistoryLoaded { thread_id, result } => {
            if !session.registry.is_active(&thread_id) {
                debug!("Dropping history for inactive thread {}", thread_id);
                return Vec::new();
            }
            session.history_loading = false;
            match result {
                Ok(messages) => {
                    debug!("Loaded {} messages for thread {}", messages.len(), thread_id);
                    session.messages = messages;
                    session.is_new_thread = false;
                    session.history_during_send = session.requests.is_pending_for(&thread_id);
                    if session.reveal.is_revealing() {
                        session.reveal.cancel();
                        return vec![Effect::StopReveal];
                    }
                }
                Err(e) => {
                    warn!("Failed to load history for thread {}: {}", thread_id, e);
                    session.status_message = String::from("Failed to load thread");
                }
            }
            Vec::new()
        }

        Action::ThreadDeleted { thread_id, result } => match result {
            Ok(()) => {
                let mut effects = Vec::new();
                if session.registry.remove(&thread_id) {
                    info!(
                        "Deleted active thread {}, now on draft {}",
                        thread_id,
                        session.registry.active()
                    );
                    session.draft.clear();
                    reset_view(session, true);
                    effects.push(Effect::StopReveal);
                    effects.push(Effect::FetchThreads);
                }
                session.status_message = String::from("Thread deleted");
                effects
            }
            Err(e) => {
                warn!("Failed to delete thread {}: {}", thread_id, e);
                session.status_message = String::from("Failed to delete thread");
                Vec::new()
            }
        },

        Action::RevealTick { generation } => {
            if session.reveal.advance(generation) && session.reveal.is_complete() {
                debug!("Reveal {} complete", generation);
                return vec![Effect::StopReveal];
            }
            Vec::new()
        }
    }
}

/// Drop everything on screen for the previous thread.
fn reset_view(session: &mut Session, is_new_thread: bool) {
    session.reveal.cancel();
    session.messages.clear();
    session.is_new_thread = is_new_thread;
    session.history_loading = false;
    session.history_during_send = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::ERROR_REPLY;
    use crate::core::reveal::RevealView;
    use crate::core::state::Phase;

    fn type_and_submit(session: &mut Session, text: &str) -> Vec<Effect> {
        update(session, Action::EditDraft(text.to_string()));
        update(session, Action::Submit)
    }

    fn resolve(session: &mut Session, thread: &ThreadId, prompt: &str, result: Result<String, ApiError>) -> Vec<Effect> {
        update(
            session,
            Action::RequestResolved(Completion {
                thread_id: thread.clone(),
                prompt: prompt.to_string(),
                result,
            }),
        )
    }

    #[test]
    fn test_submit_spawns_tagged_request() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        let effects = type_and_submit(&mut session, "Hello");

        assert_eq!(
            effects,
            vec![Effect::SendMessage(PendingRequest {
                for_thread: t1,
                prompt: "Hello".into()
            })]
        );
        assert_eq!(session.draft(), "");
        assert_eq!(session.phase(), Phase::AwaitingReply);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut session = Session::new();
        assert!(type_and_submit(&mut session, "   ").is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_second_submit_while_pending_is_noop() {
        let mut session = Session::new();
        type_and_submit(&mut session, "Hello");
        update(&mut session, Action::NewThread);
        // Input is disabled while loading, so the edit is dropped too.
        assert!(type_and_submit(&mut session, "Again").is_empty());
        assert_eq!(session.pending_request().unwrap().prompt, "Hello");
    }

    #[test]
    fn test_reply_on_same_thread_appends_and_reveals() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");

        let effects = resolve(&mut session, &t1, "Hello", Ok("Hi there friend".into()));
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::FetchThreads);
        assert!(matches!(effects[1], Effect::StartReveal(t) if t.steps == 3));

        assert_eq!(
            session.messages(),
            &[Message::user("Hello"), Message::assistant("Hi there friend")]
        );
        assert!(!session.is_new_thread());
        assert!(!session.is_loading());
        assert_eq!(session.phase(), Phase::Revealing);
    }

    #[test]
    fn test_failed_reply_appends_error_turn() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");

        resolve(&mut session, &t1, "Hello", Err(ApiError::Transport("down".into())));
        assert_eq!(
            session.messages(),
            &[Message::user("Hello"), Message::assistant(ERROR_REPLY)]
        );
        assert_eq!(session.status_message(), "Request failed");
    }

    #[test]
    fn test_stale_reply_is_not_displayed() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");

        let t2 = ThreadId::new("t2");
        update(&mut session, Action::SwitchThread(t2.clone()));
        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: t2.clone(),
                result: Ok(vec![Message::user("old"), Message::assistant("older")]),
            },
        );

        let effects = resolve(&mut session, &t1, "Hello", Ok("for t1".into()));
        assert_eq!(effects, vec![Effect::FetchThreads]);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].content, "older");
        assert!(!session.is_loading());
        assert_eq!(session.reveal().view(), RevealView::NotApplicable);
    }

    #[test]
    fn test_switch_does_not_cancel_request() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");

        let effects = update(&mut session, Action::SwitchThread(ThreadId::new("t2")));
        assert_eq!(
            effects,
            vec![
                Effect::StopReveal,
                Effect::FetchHistory(ThreadId::new("t2")),
                Effect::FetchThreads
            ]
        );
        assert_eq!(session.pending_request().unwrap().for_thread, t1);
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_switch_cancels_reveal() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");
        resolve(&mut session, &t1, "Hello", Ok("a b c".into()));
        assert!(session.reveal().is_revealing());

        update(&mut session, Action::SwitchThread(ThreadId::new("t2")));
        assert!(!session.reveal().is_revealing());
        assert_eq!(session.reveal().view(), RevealView::NotApplicable);
    }

    #[test]
    fn test_history_for_inactive_thread_is_dropped() {
        let mut session = Session::new();
        update(&mut session, Action::SwitchThread(ThreadId::new("t2")));
        update(&mut session, Action::SwitchThread(ThreadId::new("t3")));

        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: ThreadId::new("t2"),
                result: Ok(vec![Message::user("from t2")]),
            },
        );
        assert!(session.messages().is_empty());
        assert!(session.snapshot().history_loading);
    }

    #[test]
    fn test_submit_waits_for_history() {
        let mut session = Session::new();
        let t2 = ThreadId::new("t2");
        update(&mut session, Action::SwitchThread(t2.clone()));

        assert!(update(&mut session, Action::EditDraft("Hello".into())).is_empty());
        assert_eq!(session.draft(), "");
        session.draft = "Hello".to_string();
        assert!(update(&mut session, Action::Submit).is_empty());
        assert!(!session.is_loading());

        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: t2.clone(),
                result: Ok(vec![Message::user("old"), Message::assistant("older")]),
            },
        );
        assert!(session.snapshot().input_enabled);
        assert_eq!(session.draft(), "Hello");

        let effects = update(&mut session, Action::Submit);
        assert!(matches!(effects.as_slice(), [Effect::SendMessage(_)]));
        resolve(&mut session, &t2, "Hello", Ok("Hi".into()));
        assert_eq!(
            session.messages(),
            &[
                Message::user("old"),
                Message::assistant("older"),
                Message::user("Hello"),
                Message::assistant("Hi")
            ]
        );
    }

    #[test]
    fn test_history_loaded_mid_send_is_not_duplicated() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");

        update(&mut session, Action::SwitchThread(ThreadId::new("t2")));
        update(&mut session, Action::SwitchThread(t1.clone()));
        // The server stored the exchange before the reply reached us.
        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: t1.clone(),
                result: Ok(vec![Message::user("Hello"), Message::assistant("Hi")]),
            },
        );

        let effects = resolve(&mut session, &t1, "Hello", Ok("Hi".into()));
        assert_eq!(effects, vec![Effect::FetchThreads]);
        assert_eq!(
            session.messages(),
            &[Message::user("Hello"), Message::assistant("Hi")]
        );
        assert!(!session.reveal().is_revealing());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_repeated_exchange_after_history_is_appended() {
        let mut session = Session::new();
        let t1 = ThreadId::new("t1");
        update(&mut session, Action::SwitchThread(t1.clone()));
        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: t1.clone(),
                result: Ok(vec![Message::user("ping"), Message::assistant("pong")]),
            },
        );

        type_and_submit(&mut session, "ping");
        resolve(&mut session, &t1, "ping", Ok("pong".into()));
        assert_eq!(session.messages().len(), 4);
        assert!(session.reveal().is_revealing());
    }

    #[test]
    fn test_history_failure_keeps_empty_view() {
        let mut session = Session::new();
        let t2 = ThreadId::new("t2");
        update(&mut session, Action::SwitchThread(t2.clone()));
        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: t2,
                result: Err(ApiError::Response {
                    status: 404,
                    message: "not found".into(),
                }),
            },
        );
        assert!(session.messages().is_empty());
        assert!(!session.snapshot().history_loading);
        assert_eq!(session.status_message(), "Failed to load thread");
    }

    #[test]
    fn test_delete_active_thread_falls_back_to_draft() {
        let mut session = Session::new();
        let x = ThreadId::new("x");
        update(
            &mut session,
            Action::ThreadsLoaded(Ok(vec![Thread {
                id: x.clone(),
                title: "X".into(),
            }])),
        );
        update(&mut session, Action::SwitchThread(x.clone()));
        update(
            &mut session,
            Action::HistoryLoaded {
                thread_id: x.clone(),
                result: Ok(vec![Message::user("hi"), Message::assistant("hey")]),
            },
        );

        assert_eq!(
            update(&mut session, Action::DeleteThread(x.clone())),
            vec![Effect::DeleteRemote(x.clone())]
        );
        let effects = update(
            &mut session,
            Action::ThreadDeleted {
                thread_id: x.clone(),
                result: Ok(()),
            },
        );
        assert_eq!(effects, vec![Effect::StopReveal, Effect::FetchThreads]);
        assert_ne!(session.active_thread(), &x);
        assert!(session.messages().is_empty());
        assert!(session.is_new_thread());
        assert!(session.threads().is_empty());
        assert_eq!(session.phase(), Phase::Empty);
    }

    #[test]
    fn test_delete_failure_keeps_thread() {
        let mut session = Session::new();
        let x = ThreadId::new("x");
        update(
            &mut session,
            Action::ThreadsLoaded(Ok(vec![Thread {
                id: x.clone(),
                title: "X".into(),
            }])),
        );
        update(
            &mut session,
            Action::ThreadDeleted {
                thread_id: x,
                result: Err(ApiError::Transport("offline".into())),
            },
        );
        assert_eq!(session.threads().len(), 1);
        assert_eq!(session.status_message(), "Failed to delete thread");
    }

    #[test]
    fn test_refresh_failure_keeps_cache() {
        let mut session = Session::new();
        let threads = vec![Thread {
            id: ThreadId::new("a"),
            title: "A".into(),
        }];
        update(&mut session, Action::ThreadsLoaded(Ok(threads.clone())));
        update(
            &mut session,
            Action::ThreadsLoaded(Err(ApiError::Parse("bad json".into()))),
        );
        assert_eq!(session.threads(), threads.as_slice());
    }

    #[test]
    fn test_reveal_ticks_until_complete() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");
        let effects = resolve(&mut session, &t1, "Hello", Ok("one two".into()));
        let Some(Effect::StartReveal(ticket)) = effects.last().cloned() else {
            panic!("expected StartReveal, got {:?}", effects);
        };

        let generation = ticket.generation;
        assert!(update(&mut session, Action::RevealTick { generation }).is_empty());
        assert_eq!(session.reveal().view(), RevealView::Partial("one"));
        assert_eq!(
            update(&mut session, Action::RevealTick { generation }),
            vec![Effect::StopReveal]
        );
        assert_eq!(session.phase(), Phase::Settled);
        assert!(update(&mut session, Action::RevealTick { generation }).is_empty());
    }

    #[test]
    fn test_empty_reply_stops_reveal_without_timer() {
        let mut session = Session::new();
        let t1 = session.active_thread().clone();
        type_and_submit(&mut session, "Hello");
        let effects = resolve(&mut session, &t1, "Hello", Ok(String::new()));
        assert_eq!(effects, vec![Effect::FetchThreads, Effect::StopReveal]);
        assert!(session.reveal().is_complete());
    }

    #[test]
    fn test_new_thread_resets_view() {
        let mut session = Session::new();
        let before = session.active_thread().clone();
        update(&mut session, Action::EditDraft("draft".into()));
        let effects = update(&mut session, Action::NewThread);
        assert_eq!(effects, vec![Effect::StopReveal, Effect::FetchThreads]);
        assert_ne!(session.active_thread(), &before);
        assert_eq!(session.draft(), "");
        assert_eq!(session.phase(), Phase::Empty);
    }
}
