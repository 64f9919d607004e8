//! `/items/report` - how many of each item to order

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use stoqr_core::report::{report_rows, total_shortfall};
use stoqr_core::{Action, AppState, Route};

use super::Component;
use crate::event::EventKind;

pub struct ReportViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct ReportView;

impl Component<Action> for ReportView {
    type Props<'a> = ReportViewProps<'a>;

    // `'a: 'a` makes 'a early-bound to match the trait's RPITIT signature
    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        if !props.is_focused {
            return vec![];
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('r') | KeyCode::F(5) => vec![Action::ItemsFetch],
                KeyCode::Esc => vec![Action::NavigateTo(Route::Items)],
                _ => vec![],
            },
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ReportViewProps<'_>) {
        let rows = report_rows(&props.state.cache);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" Report - {} to order ", total_shortfall(&rows)))
            .title_style(Style::default().fg(Color::Cyan).bold());

        if rows.is_empty() {
            let message = if props.state.list.is_loading {
                "Loading items..."
            } else {
                "Nothing to report"
            };
            let body = Paragraph::new(Line::from(message).centered())
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(body, area);
            return;
        }

        let header = Row::new(["ID", "Name", "Needed"]).style(Style::default().fg(Color::Yellow).bold());
        let body = rows.iter().map(|row| {
            // Overstock shows as a negative number
            let style = match row.needed {
                n if n > 0 => Style::default().fg(Color::Red).bold(),
                0 => Style::default().fg(Color::Green),
                _ => Style::default().fg(Color::Blue),
            };
            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.name.clone()),
                Cell::from(row.needed.to_string()).style(style),
            ])
        });

        let table = Table::new(
            body,
            [
                Constraint::Length(6),
                Constraint::Min(12),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }
}
