//! Centralized state store with reducer and middleware
//!
//! The store is the single writer of [`AppState`]. Every state change bumps a
//! revision published on a `watch` channel so that any number of readers can
//! wait for the next render without holding a reference to the state.

use tokio::sync::watch;

use crate::action::Action;
use crate::effect::{DispatchResult, Effect};
use crate::reducer::reducer;
use crate::state::AppState;

/// Intercepts actions around the reducer
pub trait Middleware {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &Action, state: &AppState);

    /// Called after the reducer ran
    fn after(&mut self, action: &Action, result: &DispatchResult<Effect>, state: &AppState);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl Middleware for NoopMiddleware {
    fn before(&mut self, _action: &Action, _state: &AppState) {}
    fn after(&mut self, _action: &Action, _result: &DispatchResult<Effect>, _state: &AppState) {}
}

/// Logs every dispatched action at debug level.
///
/// `Tick` is skipped unless `log_ticks` is set; it fires several times a second.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    pub log_before: bool,
    pub log_ticks: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self::default()
    }

    /// Log before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_ticks: false,
        }
    }

    fn skip(&self, action: &Action) -> bool {
        matches!(action, Action::Tick) && !self.log_ticks
    }
}

impl Middleware for LoggingMiddleware {
    fn before(&mut self, action: &Action, state: &AppState) {
        if self.log_before && !self.skip(action) {
            tracing::debug!(action = %action.summary(), route = %state.route, "dispatching");
        }
    }

    fn after(&mut self, action: &Action, result: &DispatchResult<Effect>, state: &AppState) {
        if self.skip(action) {
            return;
        }
        tracing::debug!(
            action = %action.summary(),
            changed = result.changed,
            effects = result.effects.len(),
            items = state.cache.len(),
            "action processed"
        );
    }
}

/// Owns the application state and runs the reducer.
pub struct Store<M: Middleware = NoopMiddleware> {
    state: AppState,
    middleware: M,
    revision: watch::Sender<u64>,
}

impl Store<NoopMiddleware> {
    pub fn new(state: AppState) -> Self {
        Self::with_middleware(state, NoopMiddleware)
    }
}

impl<M: Middleware> Store<M> {
    pub fn with_middleware(state: AppState, middleware: M) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state,
            middleware,
            revision,
        }
    }

    /// Run `action` through middleware and the reducer.
    ///
    /// Returns the effects to execute. Subscribers are notified when the
    /// state changed.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult<Effect> {
        self.middleware.before(&action, &self.state);
        let result = reducer(&mut self.state, action.clone());
        self.middleware.after(&action, &result, &self.state);

        if result.changed {
            self.revision.send_modify(|rev| *rev += 1);
        }
        result
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Receiver that observes a new revision after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Number of state changes so far
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}
