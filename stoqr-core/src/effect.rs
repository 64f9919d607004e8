//! Effects - side effects declared by the reducer
//!
//! The reducer never performs I/O. It returns [`Effect`] values describing the
//! requests to make; [`run_effect`] turns each one into a keyed task that
//! resolves to a result action.

use std::time::Duration;

use crate::action::Action;
use crate::api::ApiClient;
use crate::item::{ItemId, NewItem};
use crate::tasks::{TaskKey, TaskManager};

/// Wait after the last search keystroke before querying
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Task key shared by every list request; a new request replaces the old one
pub const LIST_TASK: &str = "items.list";

/// Task key for the current screen's item lookup
pub const LOOKUP_TASK: &str = "view.lookup";

/// How long the withdraw confirmation stays up before returning to the list
pub const WITHDRAW_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Outcome of dispatching one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified
    pub changed: bool,
    /// Effects to run after dispatch
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Add an effect to this result
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Requests the reducer asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load the item list; `debounce` for search-as-you-type
    FetchItems {
        seq: u64,
        filter: Option<String>,
        debounce: bool,
    },
    CreateItem { request: u64, item: NewItem },
    DeleteItem { request: u64, id: ItemId },
    /// `epoch` is set when a screen owns the request
    WithdrawItem {
        request: u64,
        epoch: Option<u64>,
        id: ItemId,
    },
    /// Fetch one item for the QR or withdraw screen
    LookupItem { epoch: u64, id: ItemId },
    /// Leave the withdraw confirmation after a pause
    RedirectAfterWithdraw { epoch: u64 },
    /// Drop lookups owned by the screen being left
    CancelViewTasks,
}

impl Effect {
    /// Task key the request runs under.
    ///
    /// Mutations get one key per request so they never cancel each other.
    pub fn task_key(&self) -> TaskKey {
        match self {
            Effect::FetchItems { .. } => TaskKey::new(LIST_TASK),
            Effect::CreateItem { request, .. } => TaskKey::new(format!("items.create.{}", request)),
            Effect::DeleteItem { request, .. } => TaskKey::new(format!("items.delete.{}", request)),
            Effect::WithdrawItem { request, .. } => {
                TaskKey::new(format!("items.withdraw.{}", request))
            }
            Effect::LookupItem { .. }
            | Effect::RedirectAfterWithdraw { .. }
            | Effect::CancelViewTasks => TaskKey::new(LOOKUP_TASK),
        }
    }

    /// Perform the request and describe its outcome as an action.
    ///
    /// `CancelViewTasks` performs no request and is handled by [`run_effect`].
    pub async fn perform(self, api: ApiClient) -> Option<Action> {
        let action = match self {
            Effect::FetchItems { seq, filter, .. } => {
                match api.list_items(filter.as_deref()).await {
                    Ok(items) => Action::ItemsDidLoad { seq, items },
                    Err(error) => Action::ItemsDidError { seq, error },
                }
            }
            Effect::CreateItem { item, .. } => match api.create_item(&item).await {
                Ok(created) => Action::ItemCreateDidLoad(created),
                Err(error) => Action::ItemCreateDidError(error),
            },
            Effect::DeleteItem { id, .. } => match api.delete_item(id).await {
                Ok(()) => Action::ItemDeleteDidComplete(id),
                Err(error) => Action::ItemDeleteDidError { id, error },
            },
            Effect::WithdrawItem { epoch, id, .. } => match api.withdraw_item(id).await {
                Ok(item) => Action::ItemWithdrawDidComplete { epoch, id, item },
                Err(error) => Action::ItemWithdrawDidError { epoch, id, error },
            },
            Effect::LookupItem { epoch, id } => match api.get_item(id).await {
                Ok(item) => Action::LookupDidLoad { epoch, item },
                Err(error) => Action::LookupDidError { epoch, id, error },
            },
            Effect::RedirectAfterWithdraw { epoch } => Action::WithdrawRedirect { epoch },
            Effect::CancelViewTasks => return None,
        };
        Some(action)
    }
}

/// Schedule an effect on the task manager.
pub fn run_effect(effect: Effect, tasks: &mut TaskManager<Action>, api: &ApiClient) {
    let key = effect.task_key();
    match effect {
        Effect::CancelViewTasks => tasks.cancel(&key),
        Effect::FetchItems { debounce: true, .. } => {
            let api = api.clone();
            tasks.debounce(key, SEARCH_DEBOUNCE, async move {
                effect.perform(api).await.unwrap_or(Action::Tick)
            });
        }
        Effect::RedirectAfterWithdraw { epoch } => {
            tasks.debounce(key, WITHDRAW_REDIRECT_DELAY, async move {
                Action::WithdrawRedirect { epoch }
            });
        }
        effect => {
            let api = api.clone();
            tasks.spawn(key, async move {
                effect.perform(api).await.unwrap_or(Action::Tick)
            });
        }
    }
}
