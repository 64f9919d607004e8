//! Single-line text input used by search and the create form

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::event::EventKind;

pub struct TextInputProps<'a, A> {
    pub value: &'a str,
    /// Shown dimmed while the value is empty
    pub placeholder: &'a str,
    /// Border title
    pub label: &'a str,
    pub is_focused: bool,
    /// Red border, for a value the form rejected
    pub is_invalid: bool,
    /// Emitted with the full new value on every edit
    pub on_change: fn(String) -> A,
    /// Emitted on Enter
    pub on_submit: fn(String) -> A,
}

/// Text input with a cursor.
///
/// The value lives in app state; only the cursor is local.
#[derive(Default)]
pub struct TextInput {
    /// Byte index into the value, always on a char boundary
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put the cursor after the last character
    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.len();
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let next = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert(props.value, c))),
            KeyCode::Backspace => self.backspace(props.value).map(props.on_change),
            KeyCode::Delete => self.delete(props.value).map(props.on_change),
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let border = if props.is_invalid {
            Style::default().fg(Color::Red)
        } else if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", props.label));
        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if props.is_focused {
            let column = props.value[..self.cursor].chars().count() as u16;
            let x = area.x + 1 + column;
            if x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, key_event, ActionAssertions, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn props(value: &str, is_focused: bool) -> TextInputProps<'_, TestAction> {
        TextInputProps {
            value,
            placeholder: "",
            label: "Name",
            is_focused,
            is_invalid: false,
            on_change: TestAction::Change,
            on_submit: TestAction::Submit,
        }
    }

    fn events(input: &mut TextInput, event: EventKind, value: &str) -> Vec<TestAction> {
        input
            .handle_event(&event, props(value, true))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut input = TextInput::new();
        input.move_to_end("bolt");

        events(&mut input, key_event("s"), "bolt").assert_first(TestAction::Change("bolts".into()));

        input.cursor = 0;
        events(&mut input, key_event("M"), "bolts")
            .assert_first(TestAction::Change("Mbolts".into()));
    }

    #[test]
    fn test_backspace_handles_multibyte() {
        let mut input = TextInput::new();
        input.move_to_end("Schraube ä");

        let actions = events(&mut input, key_event("backspace"), "Schraube ä");
        actions.assert_first(TestAction::Change("Schraube ".into()));
        assert_eq!(input.cursor, "Schraube ".len());
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = TextInput::new();
        events(&mut input, key_event("backspace"), "nuts").assert_empty();
    }

    #[test]
    fn test_delete_and_cursor_moves() {
        let mut input = TextInput::new();
        events(&mut input, key_event("right"), "nuts").assert_empty();
        events(&mut input, key_event("delete"), "nuts")
            .assert_first(TestAction::Change("nts".into()));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new();
        input.move_to_end("washers");
        events(&mut input, EventKind::Key(key("ctrl+u")), "washers")
            .assert_first(TestAction::Change(String::new()));
    }

    #[test]
    fn test_submit() {
        let mut input = TextInput::new();
        events(&mut input, key_event("enter"), "gears")
            .assert_first(TestAction::Submit("gears".into()));
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut input = TextInput::new();
        let actions: Vec<_> = input
            .handle_event(&key_event("a"), props("", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_stale_cursor_is_clamped() {
        let mut input = TextInput::new();
        input.move_to_end("a long value");
        // Value was reset from outside
        events(&mut input, key_event("x"), "ab").assert_first(TestAction::Change("abx".into()));
    }

    #[test]
    fn test_render_placeholder_and_label() {
        let mut render = RenderHarness::new(30, 3);
        let mut input = TextInput::new();

        let output = render.render_to_string_plain(|frame| {
            let props = TextInputProps {
                value: "",
                placeholder: "Filter by name",
                label: "Search",
                is_focused: true,
                is_invalid: false,
                on_change: |_| (),
                on_submit: |_| (),
            };
            input.render(frame, frame.area(), props);
        });

        assert!(output.contains("Search"));
        assert!(output.contains("Filter by name"));
    }
}
