//! Application state - single source of truth for the views
//!
//! Views only ever see `&AppState`. Every change goes through the reducer.

use crate::cache::ItemCache;
use crate::error::ApiError;
use crate::form::CreateForm;
use crate::item::{Item, ItemId};
use crate::route::Route;
use crate::tasks::RequestSeq;

/// Ticks between spinner frames
pub const SPINNER_TICK_MS: u64 = 120;

/// Severity of a status bar message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible message about the last thing that happened
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Item list screen state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListView {
    /// Current name filter (sent to the server)
    pub filter: String,
    /// Whether the search input has focus
    pub searching: bool,
    pub selected: usize,
    pub is_loading: bool,
    /// Sequence of the latest list request; older results are stale
    pub seq: RequestSeq,
}

impl ListView {
    /// Filter to send, `None` when blank
    pub fn active_filter(&self) -> Option<String> {
        let trimmed = self.filter.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Item lookup for the QR screen
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Lookup {
    #[default]
    Idle,
    Loading(ItemId),
    Loaded(Item),
    Failed { id: ItemId, error: ApiError },
}

/// Progress of the withdraw screen
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WithdrawStatus {
    #[default]
    Idle,
    /// Looking the item up
    Fetching(ItemId),
    /// Withdraw request in flight
    Withdrawing(Item),
    /// Server confirmed; `item` is the updated record
    Done(Item),
    /// Nothing was withdrawn
    Failed { id: ItemId, error: ApiError },
    /// The withdraw request failed in a way that may still have applied it
    Unconfirmed { id: ItemId, error: ApiError },
}

/// Everything the UI needs to render
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Last known server items
    pub cache: ItemCache,
    pub route: Route,
    /// Bumped on every navigation; scopes view-owned requests
    pub view_epoch: u64,
    pub list: ListView,
    pub form: CreateForm,
    pub qr: Lookup,
    pub withdraw: WithdrawStatus,
    pub notice: Option<Notice>,
    /// Base URL QR codes point at
    pub public_url: String,
    /// Counter for mutation request keys
    pub requests: RequestSeq,
    /// Mutations in flight (create, delete, withdraw)
    pub pending: usize,
    pub tick_count: u32,
}

impl AppState {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            cache: ItemCache::new(),
            route: Route::Items,
            view_epoch: 0,
            list: ListView::default(),
            form: CreateForm::default(),
            qr: Lookup::Idle,
            withdraw: WithdrawStatus::Idle,
            notice: None,
            public_url: public_url.into(),
            requests: RequestSeq::new(),
            pending: 0,
            tick_count: 0,
        }
    }

    /// Read selector for the item list
    pub fn items(&self) -> &[Item] {
        self.cache.items()
    }

    /// Item under the list cursor
    pub fn selected_item(&self) -> Option<&Item> {
        self.cache.items().get(self.list.selected)
    }

    /// Whether any request is outstanding (drives the spinner)
    pub fn is_busy(&self) -> bool {
        self.list.is_loading
            || self.pending > 0
            || matches!(self.qr, Lookup::Loading(_))
            || matches!(
                self.withdraw,
                WithdrawStatus::Fetching(_) | WithdrawStatus::Withdrawing(_)
            )
    }

    /// URL the QR code for `id` encodes
    pub fn withdraw_url(&self, id: ItemId) -> String {
        format!(
            "{}/items/withdraw/{}",
            self.public_url.trim_end_matches('/'),
            id
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PUBLIC_URL)
    }
}
