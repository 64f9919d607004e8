use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use stoqr_core::{Notice, NoticeLevel};

use super::Component;

pub struct StatusBarProps<'a> {
    pub notice: Option<&'a Notice>,
    /// `(key, description)` pairs for the current screen
    pub hints: &'a [(&'a str, &'a str)],
}

/// Bottom line: the latest notice, otherwise key hints
pub struct StatusBar;

impl<A> Component<A> for StatusBar {
    type Props<'a> = StatusBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = match props.notice {
            Some(notice) => {
                let (tag, color) = match notice.level {
                    NoticeLevel::Info => (" ✓ ", Color::Green),
                    NoticeLevel::Error => (" ✗ ", Color::Red),
                };
                Line::from(vec![
                    Span::styled(tag, Style::default().fg(color).bold()),
                    Span::styled(notice.message.clone(), Style::default().fg(color)),
                    Span::styled("  (x to dismiss)", Style::default().fg(Color::DarkGray)),
                ])
            }
            None => {
                let mut spans = Vec::with_capacity(props.hints.len() * 2);
                for (key, desc) in props.hints {
                    spans.push(Span::styled(format!(" {}", key), Style::default().fg(Color::Cyan).bold()));
                    spans.push(Span::styled(format!(" {} ", desc), Style::default().fg(Color::DarkGray)));
                }
                Line::from(spans)
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
