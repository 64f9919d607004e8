//! `/items/withdraw/:id` - opened from a scanned QR code
//!
//! Withdraws exactly one unit as soon as the item is found, confirms, then
//! returns to the item list on its own.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use stoqr_core::{Action, AppState, Route, WithdrawStatus};

use super::qr_view::failure_message;
use super::{spinner, Component};
use crate::event::EventKind;

pub struct WithdrawViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct WithdrawView;

impl Component<Action> for WithdrawView {
    type Props<'a> = WithdrawViewProps<'a>;

    // `'a: 'a` makes 'a early-bound to match the trait's RPITIT signature
    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };
        match (&props.state.withdraw, key.code) {
            (WithdrawStatus::Done(_) | WithdrawStatus::Unconfirmed { .. }, KeyCode::Enter) => {
                vec![Action::NavigateTo(Route::Items)]
            }
            // Only offered when nothing was withdrawn
            (WithdrawStatus::Failed { id, .. }, KeyCode::Char('r')) => {
                vec![Action::NavigateTo(Route::Withdraw(*id))]
            }
            (_, KeyCode::Esc) => vec![Action::NavigateTo(Route::Items)],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WithdrawViewProps<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Withdraw ")
            .title_style(Style::default().fg(Color::Cyan).bold());

        let hint = |text: &'static str| Line::from(text).style(Style::default().fg(Color::DarkGray));
        let busy = spinner(state.tick_count);

        let lines = match &state.withdraw {
            WithdrawStatus::Idle => vec![],
            WithdrawStatus::Fetching(id) => {
                vec![Line::from(format!("{} Looking up item #{}...", busy, id))]
            }
            WithdrawStatus::Withdrawing(item) => {
                vec![Line::from(format!("{} Withdrawing one {}...", busy, item.name))]
            }
            WithdrawStatus::Done(item) => vec![
                Line::from(Span::styled(
                    format!("Withdrew one {}", item.name),
                    Style::default().fg(Color::Green).bold(),
                )),
                Line::from(format!("{} left (desired {})", item.actual, item.desired)),
                Line::default(),
                hint("back to items in a moment, enter to go now"),
            ],
            WithdrawStatus::Failed { id, error } => vec![
                Line::from(failure_message(*id, error)).style(Style::default().fg(Color::Red)),
                Line::from("Nothing was withdrawn.").style(Style::default().fg(Color::Gray)),
                Line::default(),
                hint("r retry  esc back"),
            ],
            WithdrawStatus::Unconfirmed { id, error } => vec![
                Line::from(format!("Could not confirm the withdrawal of #{}: {}", id, error))
                    .style(Style::default().fg(Color::Red)),
                Line::from("It may have gone through. Check the item list before trying again.")
                    .style(Style::default().fg(Color::Yellow)),
                Line::default(),
                hint("enter check the list  esc back"),
            ],
        };

        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, area);
    }
}
