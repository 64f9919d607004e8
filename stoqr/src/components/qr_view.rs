//! `/items/qr/:id` - the withdrawal link a printed QR code carries

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use stoqr_core::{Action, ApiError, AppState, Lookup, Route};

use super::{spinner, Component};
use crate::event::EventKind;

pub struct QrViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct QrView;

impl Component<Action> for QrView {
    type Props<'a> = QrViewProps<'a>;

    // `'a: 'a` makes 'a early-bound to match the trait's RPITIT signature
    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        if !props.is_focused {
            return vec![];
        }
        let Route::Qr(id) = props.state.route else {
            return vec![];
        };
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace => vec![Action::NavigateTo(Route::Items)],
                // Open the link as a scan would
                KeyCode::Char('w') => vec![Action::NavigateTo(Route::Withdraw(id))],
                KeyCode::Char('r') => vec![Action::NavigateTo(Route::Qr(id))],
                _ => vec![],
            },
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: QrViewProps<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" QR code ")
            .title_style(Style::default().fg(Color::Cyan).bold());

        let lines = match &state.qr {
            Lookup::Idle => vec![],
            Lookup::Loading(id) => vec![Line::from(format!(
                "{} Loading item #{}...",
                spinner(state.tick_count),
                id
            ))],
            Lookup::Loaded(item) => vec![
                Line::from(Span::styled(item.name.clone(), Style::default().bold())),
                Line::from(format!(
                    "#{}  desired {}  actual {}",
                    item.id, item.desired, item.actual
                ))
                .style(Style::default().fg(Color::Gray)),
                Line::default(),
                Line::from("Scanning the code opens:").style(Style::default().fg(Color::DarkGray)),
                Line::from(Span::styled(
                    state.withdraw_url(item.id),
                    Style::default().fg(Color::Cyan).underlined(),
                )),
                Line::default(),
                Line::from("w withdraw one now  esc back").style(Style::default().fg(Color::DarkGray)),
            ],
            Lookup::Failed { id, error } => vec![
                Line::from(failure_message(*id, error)).style(Style::default().fg(Color::Red)),
                Line::from("r retry  esc back").style(Style::default().fg(Color::DarkGray)),
            ],
        };

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, area);
    }
}

pub(crate) fn failure_message(id: stoqr_core::ItemId, error: &ApiError) -> String {
    match error {
        ApiError::NotFound => format!("Item #{} does not exist", id),
        other => format!("Could not load item #{}: {}", id, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_event, ActionAssertions, RenderHarness};
    use stoqr_core::{ItemId, NewItem};

    fn render(state: &AppState) -> String {
        let mut harness = RenderHarness::new(70, 12);
        harness.render_to_string_plain(|frame| {
            QrView.render(
                frame,
                frame.area(),
                QrViewProps {
                    state,
                    is_focused: true,
                },
            );
        })
    }

    #[test]
    fn test_render_link_payload() {
        let state = AppState {
            route: Route::Qr(ItemId(7)),
            qr: Lookup::Loaded(NewItem::new("Gears", 3, 1).with_id(ItemId(7))),
            public_url: "https://stoqr.example.com".into(),
            ..Default::default()
        };

        let output = render(&state);
        assert!(output.contains("Gears"));
        assert!(output.contains("https://stoqr.example.com/items/withdraw/7"));
    }

    #[test]
    fn test_render_not_found() {
        let state = AppState {
            route: Route::Qr(ItemId(9)),
            qr: Lookup::Failed {
                id: ItemId(9),
                error: ApiError::NotFound,
            },
            ..Default::default()
        };
        assert!(render(&state).contains("Item #9 does not exist"));
    }

    #[test]
    fn test_keys() {
        let state = AppState {
            route: Route::Qr(ItemId(7)),
            ..Default::default()
        };
        let props = || QrViewProps {
            state: &state,
            is_focused: true,
        };

        QrView
            .handle_event(&key_event("w"), props())
            .assert_first(Action::NavigateTo(Route::Withdraw(ItemId(7))));
        QrView
            .handle_event(&key_event("esc"), props())
            .assert_first(Action::NavigateTo(Route::Items));
    }
}
