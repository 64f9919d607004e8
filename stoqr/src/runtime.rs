//! Event/action/render loop
//!
//! Terminal events are mapped to actions, actions go through the store, and
//! the effects the reducer returns become keyed tasks whose results are fed
//! back in as actions. The screen is redrawn whenever the store's revision
//! moves.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use stoqr_core::{
    run_effect, Action, ApiClient, AppState, LoggingMiddleware, Store, Subscriptions, TaskManager,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Actions produced by one terminal event, plus a render hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    /// Redraw even if no state changed (terminal resize)
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    pub fn actions(actions: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

enum Input {
    Event(EventKind),
    Action(Action),
}

/// Owns the store, the task manager and the timers for one session.
pub struct Runtime {
    store: Store<LoggingMiddleware>,
    api: ApiClient,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    tasks: TaskManager<Action>,
    subscriptions: Subscriptions<Action>,
    poller_config: PollerConfig,
}

impl Runtime {
    pub fn new(state: AppState, api: ApiClient) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: Store::with_middleware(state, LoggingMiddleware::new()),
            api,
            tasks: TaskManager::new(action_tx.clone()),
            subscriptions: Subscriptions::new(action_tx.clone()),
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
        }
    }

    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the queue; it is dispatched once `run` starts.
    pub fn enqueue(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<Action> {
        &mut self.subscriptions
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Dispatch one action and schedule its effects.
    ///
    /// Returns `false` when the action asks the app to quit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if matches!(action, Action::Quit) {
            return false;
        }
        let result = self.store.dispatch(action);
        for effect in result.effects {
            run_effect(effect, &mut self.tasks, &self.api);
        }
        true
    }

    /// Run until an `Action::Quit` is dispatched.
    pub async fn run<B, FRender, FEvent>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &AppState),
        FEvent: FnMut(&EventKind, &AppState) -> EventOutcome<Action>,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        let mut revision = self.store.subscribe();
        let mut should_render = true;

        let result = loop {
            if should_render || revision.has_changed().unwrap_or(false) {
                revision.mark_unchanged();
                let state = self.store.state();
                let drawn = terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                });
                if let Err(e) = drawn {
                    break Err(e);
                }
                should_render = false;
            }

            let next = tokio::select! {
                Some(raw_event) = event_rx.recv() => Input::Event(process_raw_event(raw_event)),
                Some(action) = self.action_rx.recv() => Input::Action(action),
                else => break Ok(()),
            };

            let keep_running = match next {
                Input::Event(event) => {
                    let outcome = map_event(&event, self.store.state());
                    should_render |= outcome.needs_render;
                    outcome.actions.into_iter().all(|action| self.dispatch(action))
                }
                Input::Action(action) => self.dispatch(action),
            };

            if !keep_running {
                break Ok(());
            }
        };

        tracing::debug!(tasks = self.tasks.len(), "shutting down");
        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();
        result
    }
}
