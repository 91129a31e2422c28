//! # Effect Runtime
//!
//! Performs the I/O that `core::update()` asks for and reports the results
//! back as `Action`s on a channel. The event loop owns both ends: it feeds
//! actions into `update()` and hands the returned effects to [`Runtime::execute`].
//!
//! Network effects run as detached tokio tasks and are never cancelled.
//! The reveal timer is the one cancellable resource: there is at most one
//! alive at a time, it is aborted whenever a new reveal starts or the view
//! changes, and it exits by itself after its last tick.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::api::{ThreadId, ThreadStore};
use crate::core::action::{Action, Effect};
use crate::core::request::{Completion, PendingRequest};
use crate::core::reveal::RevealTicket;

pub struct Runtime {
    store: Arc<dyn ThreadStore>,
    tx: UnboundedSender<Action>,
    reveal_interval: Duration,
    reveal_timer: Option<JoinHandle<()>>,
}

impl Runtime {
    pub fn new(store: Arc<dyn ThreadStore>, tx: UnboundedSender<Action>, reveal_interval: Duration) -> Self {
        Self {
            store,
            tx,
            reveal_interval,
            reveal_timer: None,
        }
    }

    /// Run every effect in order. Returns true if one of them was `Quit`.
    pub fn execute(&mut self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            debug!("Executing effect: {:?}", effect);
            match effect {
                Effect::SendMessage(request) => self.spawn_send(request),
                Effect::FetchThreads => self.spawn_fetch_threads(),
                Effect::FetchHistory(thread_id) => self.spawn_fetch_history(thread_id),
                Effect::DeleteRemote(thread_id) => self.spawn_delete(thread_id),
                Effect::StartReveal(ticket) => self.start_reveal_timer(ticket),
                Effect::StopReveal => self.stop_reveal_timer(),
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    /// Number of reveal timers still running. Never more than one.
    pub fn active_reveal_timers(&self) -> usize {
        self.reveal_timer
            .as_ref()
            .map_or(0, |handle| usize::from(!handle.is_finished()))
    }

    fn spawn_send(&self, request: PendingRequest) {
        info!(
            "Spawning send via {} for thread {}",
            self.store.name(),
            request.for_thread
        );
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store
                .send_message(&request.for_thread, &request.prompt)
                .await;
            let completion = Completion {
                thread_id: request.for_thread,
                prompt: request.prompt,
                result,
            };
            if tx.send(Action::RequestResolved(completion)).is_err() {
                warn!("Failed to deliver send result: receiver dropped");
            }
        });
    }

    fn spawn_fetch_threads(&self) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store.list_threads().await;
            if tx.send(Action::ThreadsLoaded(result)).is_err() {
                warn!("Failed to deliver thread list: receiver dropped");
            }
        });
    }

    fn spawn_fetch_history(&self, thread_id: ThreadId) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store.thread_history(&thread_id).await;
            if tx.send(Action::HistoryLoaded { thread_id, result }).is_err() {
                warn!("Failed to deliver thread history: receiver dropped");
            }
        });
    }

    fn spawn_delete(&self, thread_id: ThreadId) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = store.delete_thread(&thread_id).await;
            if tx.send(Action::ThreadDeleted { thread_id, result }).is_err() {
                warn!("Failed to deliver delete result: receiver dropped");
            }
        });
    }

    fn start_reveal_timer(&mut self, ticket: RevealTicket) {
        self.stop_reveal_timer();

        let tx = self.tx.clone();
        let period = self.reveal_interval;
        debug!(
            "Starting reveal timer {} ({} steps every {:?})",
            ticket.generation, ticket.steps, period
        );
        self.reveal_timer = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            for _ in 0..ticket.steps {
                ticker.tick().await;
                let tick = Action::RevealTick {
                    generation: ticket.generation,
                };
                if tx.send(tick).is_err() {
                    return;
                }
            }
        }));
    }

    fn stop_reveal_timer(&mut self) {
        if let Some(handle) = self.reveal_timer.take() {
            handle.abort();
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.stop_reveal_timer();
    }
}
