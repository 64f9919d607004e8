//! Core state and plumbing for the STOQR inventory client
//!
//! This crate holds everything that does not touch the terminal:
//!
//! - **Item model and cache**: [`Item`], [`ItemCache`]
//! - **Store**: [`Store`] runs the [`reducer`] and notifies subscribers
//! - **Actions and effects**: views emit [`Action`]s, the reducer answers with
//!   [`Effect`]s, and [`run_effect`] executes them as keyed tasks
//! - **HTTP client**: [`ApiClient`] with classified [`ApiError`]s
//! - **Routing**: [`Route`] parsing for `/items/...` paths and QR URLs
//!
//! # Flow
//!
//! ```ignore
//! let api = ApiClient::new(&config)?;
//! let mut store = Store::new(AppState::new(&config.public_url));
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut tasks = TaskManager::new(tx);
//!
//! for effect in store.dispatch(Action::NavigateTo(Route::Items)).effects {
//!     run_effect(effect, &mut tasks, &api);
//! }
//! while let Some(result) = rx.recv().await {
//!     for effect in store.dispatch(result).effects {
//!         run_effect(effect, &mut tasks, &api);
//!     }
//! }
//! ```

pub mod action;
pub mod api;
pub mod cache;
pub mod config;
pub mod effect;
pub mod error;
pub mod form;
pub mod item;
pub mod reducer;
pub mod report;
pub mod route;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod tasks;

pub use action::Action;
pub use api::ApiClient;
pub use cache::ItemCache;
pub use config::{ClientConfig, FileConfig, WithdrawMethod};
pub use effect::{run_effect, DispatchResult, Effect};
pub use error::{ApiError, ConfigError};
pub use form::{CreateForm, FormError, FormField};
pub use item::{Item, ItemId, NewItem};
pub use reducer::reducer;
pub use report::{report_rows, ReportRow};
pub use route::Route;
pub use state::{AppState, Lookup, Notice, NoticeLevel, WithdrawStatus};
pub use store::{LoggingMiddleware, Middleware, NoopMiddleware, Store};
pub use subscriptions::Subscriptions;
pub use tasks::{RequestSeq, TaskKey, TaskManager};
