use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use stoqr_core::{AppState, Route};

use super::{spinner, Component};

pub struct MenuBarProps<'a> {
    pub state: &'a AppState,
}

/// Brand, screen tabs and the out-of-stock badge
pub struct MenuBar;

const TABS: [(&str, Route); 3] = [
    ("1 Items", Route::Items),
    ("2 Create", Route::Create),
    ("3 Report", Route::Report),
];

impl<A> Component<A> for MenuBar {
    type Props<'a> = MenuBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let mut spans = vec![Span::styled(
            " STOQR ",
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        )];
        spans.push(Span::raw(" "));

        for (label, route) in TABS {
            let style = if state.route == route {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", label), style));
        }

        // Routes without a tab still show where the user is
        if !TABS.iter().any(|(_, route)| *route == state.route) {
            spans.push(Span::styled(
                format!(" {} ", state.route.title()),
                Style::default().fg(Color::Cyan).bold(),
            ));
        }

        let out_of_stock = state.cache.out_of_stock_count();
        if out_of_stock > 0 {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!(" {} out of stock ", out_of_stock),
                Style::default().fg(Color::White).bg(Color::Red).bold(),
            ));
        }

        if state.is_busy() {
            spans.push(Span::styled(
                format!("  {}", spinner(state.tick_count)),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
