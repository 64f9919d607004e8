//! Screens and widgets
//!
//! Components follow these rules:
//! 1. Props carry all read-only data needed for rendering
//! 2. `handle_event` returns actions and never mutates shared state
//! 3. `render` is a pure function of props plus local UI state (cursor, scroll)

mod create_form;
mod items_view;
mod menu_bar;
mod qr_view;
mod report_view;
mod status_bar;
mod text_input;
mod withdraw_view;

pub use create_form::{CreateFormView, CreateFormViewProps};
pub use items_view::{ItemsView, ItemsViewProps};
pub use menu_bar::{MenuBar, MenuBarProps};
pub use qr_view::{QrView, QrViewProps};
pub use report_view::{ReportView, ReportViewProps};
pub use status_bar::{StatusBar, StatusBarProps};
pub use text_input::{TextInput, TextInputProps};
pub use withdraw_view::{WithdrawView, WithdrawViewProps};

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// Spinner frames shown while requests are in flight
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// A UI element that renders from props and emits actions
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Translate an event into actions.
    ///
    /// Default: render-only component, no actions.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// Current spinner frame for a tick count
pub fn spinner(tick_count: u32) -> &'static str {
    SPINNERS[(tick_count as usize / 2) % SPINNERS.len()]
}
