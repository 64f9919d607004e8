//! Screen router: picks the view for the current route and routes input to it

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use stoqr_core::{Action, AppState, Route};

use crate::components::{
    Component, CreateFormView, CreateFormViewProps, ItemsView, ItemsViewProps, MenuBar,
    MenuBarProps, QrView, QrViewProps, ReportView, ReportViewProps, StatusBar, StatusBarProps,
    WithdrawView, WithdrawViewProps,
};
use crate::event::EventKind;
use crate::runtime::EventOutcome;

#[derive(Default)]
pub struct StoqrUi {
    items: ItemsView,
    form: CreateFormView,
}

/// Whether keystrokes are text for an input rather than shortcuts
fn is_typing(state: &AppState) -> bool {
    match state.route {
        Route::Create => true,
        Route::Items => state.list.searching,
        _ => false,
    }
}

fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    match state.route {
        Route::Items if state.list.searching => &[("enter", "done"), ("esc", "close"), ("ctrl+u", "clear")],
        Route::Items => &[
            ("j/k", "move"),
            ("/", "search"),
            ("enter", "qr"),
            ("w", "withdraw"),
            ("d", "delete"),
            ("n", "new"),
            ("r", "reload"),
            ("q", "quit"),
        ],
        Route::Create => &[("tab", "next field"), ("enter", "save"), ("esc", "cancel")],
        Route::Qr(_) => &[("w", "withdraw"), ("esc", "back"), ("q", "quit")],
        Route::Report => &[("r", "reload"), ("1", "items"), ("q", "quit")],
        Route::Withdraw(_) => &[("enter", "items"), ("esc", "back"), ("q", "quit")],
    }
}

impl StoqrUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        Component::<Action>::render(&mut MenuBar, frame, chunks[0], MenuBarProps { state });

        let body = chunks[1];
        match state.route {
            Route::Items => self.items.render(
                frame,
                body,
                ItemsViewProps {
                    state,
                    is_focused: true,
                },
            ),
            Route::Create => self.form.render(
                frame,
                body,
                CreateFormViewProps {
                    form: &state.form,
                    is_focused: true,
                },
            ),
            Route::Qr(_) => QrView.render(
                frame,
                body,
                QrViewProps {
                    state,
                    is_focused: true,
                },
            ),
            Route::Report => ReportView.render(
                frame,
                body,
                ReportViewProps {
                    state,
                    is_focused: true,
                },
            ),
            Route::Withdraw(_) => WithdrawView.render(
                frame,
                body,
                WithdrawViewProps {
                    state,
                    is_focused: true,
                },
            ),
        }

        Component::<Action>::render(
            &mut StatusBar,
            frame,
            chunks[2],
            StatusBarProps {
                notice: state.notice.as_ref(),
                hints: hints(state),
            },
        );
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if let EventKind::Resize(..) = event {
            return EventOutcome::needs_render();
        }
        if event.is_force_quit() {
            return EventOutcome::action(Action::Quit);
        }

        if !is_typing(state) {
            if let EventKind::Key(key) = event {
                match key.code {
                    KeyCode::Char('q') => return EventOutcome::action(Action::Quit),
                    KeyCode::Char('1') => return Action::NavigateTo(Route::Items).into(),
                    KeyCode::Char('2') => return Action::NavigateTo(Route::Create).into(),
                    KeyCode::Char('3') => return Action::NavigateTo(Route::Report).into(),
                    KeyCode::Char('x') if state.notice.is_some() => {
                        return EventOutcome::action(Action::NoticeDismiss)
                    }
                    _ => {}
                }
            }
        }

        let actions = match state.route {
            Route::Items => self.items.handle_event(
                event,
                ItemsViewProps {
                    state,
                    is_focused: true,
                },
            ),
            Route::Create => self.form.handle_event(
                event,
                CreateFormViewProps {
                    form: &state.form,
                    is_focused: true,
                },
            ),
            Route::Qr(_) => QrView.handle_event(
                event,
                QrViewProps {
                    state,
                    is_focused: true,
                },
            ),
            Route::Report => ReportView.handle_event(
                event,
                ReportViewProps {
                    state,
                    is_focused: true,
                },
            ),
            Route::Withdraw(_) => WithdrawView.handle_event(
                event,
                WithdrawViewProps {
                    state,
                    is_focused: true,
                },
            ),
        };
        EventOutcome::actions(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_event, type_text};
    use stoqr_core::{FormField, ItemId};

    #[test]
    fn test_global_shortcuts() {
        let mut ui = StoqrUi::new();
        let state = AppState::default();

        assert_eq!(ui.map_event(&key_event("q"), &state).actions, vec![Action::Quit]);
        assert_eq!(
            ui.map_event(&key_event("3"), &state).actions,
            vec![Action::NavigateTo(Route::Report)]
        );
    }

    #[test]
    fn test_shortcuts_are_text_in_form() {
        let mut ui = StoqrUi::new();
        let state = AppState {
            route: Route::Create,
            ..Default::default()
        };

        let actions: Vec<Action> = type_text("q1")
            .iter()
            .flat_map(|event| ui.map_event(event, &state).actions)
            .collect();

        // Each keystroke edits the unchanged name field
        assert_eq!(
            actions,
            vec![
                Action::FormFieldChange(FormField::Name, "q".into()),
                Action::FormFieldChange(FormField::Name, "1".into()),
            ]
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut ui = StoqrUi::new();
        let state = AppState {
            route: Route::Create,
            ..Default::default()
        };
        assert_eq!(
            ui.map_event(&key_event("ctrl+c"), &state).actions,
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_routes_to_current_view() {
        let mut ui = StoqrUi::new();
        let state = AppState {
            route: Route::Qr(ItemId(2)),
            ..Default::default()
        };
        assert_eq!(
            ui.map_event(&key_event("w"), &state).actions,
            vec![Action::NavigateTo(Route::Withdraw(ItemId(2)))]
        );
    }

    #[test]
    fn test_resize_only_rerenders() {
        let mut ui = StoqrUi::new();
        let outcome = ui.map_event(&EventKind::Resize(100, 40), &AppState::default());
        assert!(outcome.actions.is_empty());
        assert!(outcome.needs_render);
    }
}
