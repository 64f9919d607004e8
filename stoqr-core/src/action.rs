//! Actions - everything that can change the state
//!
//! Naming convention:
//! - prefix names the area: `Items*`, `Search*`, `Form*`, `Item*`
//! - `Did` marks the result of an async request
//! - results carry the sequence number or view epoch they were issued with

use crate::error::ApiError;
use crate::form::FormField;
use crate::item::{Item, ItemId};
use crate::route::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Navigation =====
    /// Show another screen
    NavigateTo(Route),

    // ===== Item list =====
    /// Reload the list with the current filter
    ItemsFetch,
    /// Result: list request `seq` succeeded
    ItemsDidLoad { seq: u64, items: Vec<Item> },
    /// Result: list request `seq` failed
    ItemsDidError { seq: u64, error: ApiError },
    /// Move the list cursor
    ItemsSelect(usize),

    // ===== Search =====
    SearchOpen,
    SearchQueryChange(String),
    /// Leave the search input, keeping the filter
    SearchClose,
    /// Drop the filter and reload
    SearchClear,

    // ===== Create form =====
    FormFieldChange(FormField, String),
    FormFocus(FormField),
    FormSubmit,

    // ===== Item mutations =====
    /// Result: create succeeded, `item` carries the assigned id
    ItemCreateDidLoad(Item),
    ItemCreateDidError(ApiError),
    ItemDelete(ItemId),
    ItemDeleteDidComplete(ItemId),
    ItemDeleteDidError { id: ItemId, error: ApiError },
    /// Withdraw one unit without leaving the list
    ItemWithdraw(ItemId),
    /// Result: withdraw succeeded. `item` is the server's updated record,
    /// `None` if it answered without one
    ItemWithdrawDidComplete {
        epoch: Option<u64>,
        id: ItemId,
        item: Option<Item>,
    },
    ItemWithdrawDidError {
        epoch: Option<u64>,
        id: ItemId,
        error: ApiError,
    },

    // ===== View lookups (QR / withdraw screens) =====
    LookupDidLoad { epoch: u64, item: Item },
    LookupDidError { epoch: u64, id: ItemId, error: ApiError },
    /// The withdraw confirmation for screen `epoch` has been shown long enough
    WithdrawRedirect { epoch: u64 },

    // ===== Global =====
    NoticeDismiss,
    /// Periodic tick for the spinner
    Tick,
    Quit,
}

impl Action {
    /// Variant name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::NavigateTo(_) => "NavigateTo",
            Action::ItemsFetch => "ItemsFetch",
            Action::ItemsDidLoad { .. } => "ItemsDidLoad",
            Action::ItemsDidError { .. } => "ItemsDidError",
            Action::ItemsSelect(_) => "ItemsSelect",
            Action::SearchOpen => "SearchOpen",
            Action::SearchQueryChange(_) => "SearchQueryChange",
            Action::SearchClose => "SearchClose",
            Action::SearchClear => "SearchClear",
            Action::FormFieldChange(..) => "FormFieldChange",
            Action::FormFocus(_) => "FormFocus",
            Action::FormSubmit => "FormSubmit",
            Action::ItemCreateDidLoad(_) => "ItemCreateDidLoad",
            Action::ItemCreateDidError(_) => "ItemCreateDidError",
            Action::ItemDelete(_) => "ItemDelete",
            Action::ItemDeleteDidComplete(_) => "ItemDeleteDidComplete",
            Action::ItemDeleteDidError { .. } => "ItemDeleteDidError",
            Action::ItemWithdraw(_) => "ItemWithdraw",
            Action::ItemWithdrawDidComplete { .. } => "ItemWithdrawDidComplete",
            Action::ItemWithdrawDidError { .. } => "ItemWithdrawDidError",
            Action::LookupDidLoad { .. } => "LookupDidLoad",
            Action::LookupDidError { .. } => "LookupDidError",
            Action::WithdrawRedirect { .. } => "WithdrawRedirect",
            Action::NoticeDismiss => "NoticeDismiss",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }

    /// Whether this action carries the result of a request
    pub fn is_async_result(&self) -> bool {
        self.name().contains("Did")
    }

    /// Concise description for the action log
    pub fn summary(&self) -> String {
        match self {
            Action::ItemsDidLoad { seq, items } => {
                format!("ItemsDidLoad {{ seq: {}, items: {} }}", seq, items.len())
            }
            Action::ItemsDidError { seq, error } => {
                format!("ItemsDidError {{ seq: {}, kind: {} }}", seq, error.kind())
            }
            Action::ItemCreateDidLoad(item) => format!("ItemCreateDidLoad {{ id: {} }}", item.id),
            Action::LookupDidLoad { epoch, item } => {
                format!("LookupDidLoad {{ epoch: {}, id: {} }}", epoch, item.id)
            }
            Action::FormFieldChange(field, _) => format!("FormFieldChange({:?})", field),
            _ => format!("{:?}", self),
        }
    }
}
