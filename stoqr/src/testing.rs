//! Test utilities for components and views
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+u"` or `"enter"`
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - [`ActionAssertions`]: terse checks on the actions a component emitted

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Shorthand for `EventKind::Key(key(s))`
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// One key event per character, for typing into inputs
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars()
        .map(|c| {
            EventKind::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
        })
        .collect()
}

/// Parse "q", "esc", "ctrl+u", "shift+tab" into a key event
pub fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let lowered = key_str.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    if lowered == "shift+tab" || lowered == "backtab" {
        return Some(KeyEvent {
            code: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        });
    }

    let parts: Vec<&str> = lowered.split('+').collect();
    let mut modifiers = KeyModifiers::empty();
    for part in &parts[..parts.len() - 1] {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match parts.last()?.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "f5" => KeyCode::F(5),
        "space" => KeyCode::Char(' '),
        // Keep the original case for single characters ("R" vs "r")
        c if c.chars().count() == 1 => {
            let original = key_str.trim();
            KeyCode::Char(original.chars().last()?)
        }
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Renders into a `TestBackend` of a fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {}", e));
        Self { terminal }
    }

    /// Draw once and return the resulting buffer
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("failed to draw: {}", e));
        self.terminal.backend().buffer()
    }

    /// Draw once and return the screen as plain text, one line per row
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        let buffer = self.render(draw).clone();
        buffer_to_string_plain(&buffer)
    }
}

/// Buffer contents without styling, trailing spaces trimmed per row
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assertions on a list of emitted actions
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + std::fmt::Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "unexpected actions: {:?}", self);
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(self.first(), Some(&expected), "actions were {:?}", self);
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "expected {:?} in {:?}",
            expected,
            self
        );
    }
}
