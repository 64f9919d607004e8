//! Terminal client for the STOQR inventory API
//!
//! The state machine lives in `stoqr-core`; this crate adds the terminal:
//! event polling, the views, the screen router and the run loop.

pub mod components;
pub mod event;
pub mod logging;
pub mod runtime;
pub mod testing;
pub mod ui;

pub use runtime::{EventOutcome, PollerConfig, Runtime};
pub use ui::StoqrUi;
