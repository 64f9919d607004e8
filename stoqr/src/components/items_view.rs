//! `/items` - item table with search
//!
//! Keys (list focused):
//! - `j`/`k`, arrows, scroll wheel: move the cursor
//! - `/`: search, `esc`: clear the filter
//! - `enter`: QR code for the selected item
//! - `w`: withdraw one, `d`: delete, `n`: new item, `r`: reload

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use stoqr_core::{Action, AppState, Item, Route};

use super::{Component, TextInput, TextInputProps};
use crate::event::EventKind;

pub struct ItemsViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct ItemsView {
    search: TextInput,
    table: TableState,
}

impl ItemsView {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> TextInputProps<'a, Action> {
        TextInputProps {
            value: &state.list.filter,
            placeholder: "type to filter by name",
            label: "Search",
            is_focused,
            is_invalid: false,
            on_change: Action::SearchQueryChange,
            on_submit: |_| Action::SearchClose,
        }
    }

    fn handle_list_key(&mut self, code: KeyCode, state: &AppState) -> Vec<Action> {
        let selected = state.list.selected;
        let last = state.items().len().saturating_sub(1);
        let selected_id = state.selected_item().map(|item| item.id);

        match code {
            KeyCode::Char('j') | KeyCode::Down => vec![Action::ItemsSelect(selected + 1)],
            KeyCode::Char('k') | KeyCode::Up => vec![Action::ItemsSelect(selected.saturating_sub(1))],
            KeyCode::Char('g') | KeyCode::Home => vec![Action::ItemsSelect(0)],
            KeyCode::Char('G') | KeyCode::End => vec![Action::ItemsSelect(last)],
            KeyCode::Char('/') => {
                self.search.move_to_end(&state.list.filter);
                vec![Action::SearchOpen]
            }
            KeyCode::Esc if !state.list.filter.is_empty() => vec![Action::SearchClear],
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::ItemsFetch],
            KeyCode::Char('n') => vec![Action::NavigateTo(Route::Create)],
            KeyCode::Enter => selected_id
                .map(|id| vec![Action::NavigateTo(Route::Qr(id))])
                .unwrap_or_default(),
            KeyCode::Char('w') => selected_id
                .map(|id| vec![Action::ItemWithdraw(id)])
                .unwrap_or_default(),
            KeyCode::Char('d') | KeyCode::Delete => selected_id
                .map(|id| vec![Action::ItemDelete(id)])
                .unwrap_or_default(),
            _ => vec![],
        }
    }
}

impl Component<Action> for ItemsView {
    type Props<'a> = ItemsViewProps<'a>;

    // `'a: 'a` makes 'a early-bound to match the trait's RPITIT signature
    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        if !props.is_focused {
            return vec![];
        }
        let state = props.state;

        if state.list.searching {
            if let EventKind::Key(key) = event {
                if key.code == KeyCode::Esc {
                    return vec![Action::SearchClose];
                }
            }
            return self
                .search
                .handle_event(event, Self::search_props(state, true))
                .into_iter()
                .collect();
        }

        match event {
            EventKind::Key(key) => self.handle_list_key(key.code, state),
            EventKind::Scroll { delta, .. } => {
                let selected = state.list.selected;
                let next = if *delta > 0 {
                    selected + 1
                } else {
                    selected.saturating_sub(1)
                };
                vec![Action::ItemsSelect(next)]
            }
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ItemsViewProps<'_>) {
        let state = props.state;
        let show_search = state.list.searching || !state.list.filter.is_empty();

        let chunks = Layout::vertical([
            Constraint::Length(if show_search { 3 } else { 0 }),
            Constraint::Min(1),
        ])
        .split(area);

        if show_search {
            let focused = props.is_focused && state.list.searching;
            self.search
                .render(frame, chunks[0], Self::search_props(state, focused));
        }

        let title = if state.list.filter.trim().is_empty() {
            format!(" Items ({}) ", state.items().len())
        } else {
            format!(
                " Items ({}) matching '{}' ",
                state.items().len(),
                state.list.filter.trim()
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).bold());

        if state.items().is_empty() {
            let message = if state.list.is_loading {
                "Loading items..."
            } else if state.list.active_filter().is_some() {
                "No items match the filter"
            } else {
                "No items yet. Press n to create one."
            };
            let body = Paragraph::new(Line::from(message).centered())
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(body, chunks[1]);
            return;
        }

        let header = Row::new(["ID", "Name", "Desired", "Actual"])
            .style(Style::default().fg(Color::Yellow).bold());
        let rows = state.items().iter().map(item_row);
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        self.table.select(Some(state.list.selected));
        frame.render_stateful_widget(table, chunks[1], &mut self.table);
    }
}

fn item_row(item: &Item) -> Row<'static> {
    let actual_style = if item.is_out_of_stock() {
        Style::default().fg(Color::Red).bold()
    } else if item.actual < item.desired {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };
    Row::new(vec![
        Cell::from(item.id.to_string()),
        Cell::from(item.name.clone()),
        Cell::from(item.desired.to_string()),
        Cell::from(item.actual.to_string()).style(actual_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key_event, ActionAssertions, RenderHarness};
    use stoqr_core::{ItemId, NewItem};

    fn state_with_items() -> AppState {
        let mut state = AppState::default();
        state.cache.replace_all(vec![
            NewItem::new("Bolts", 100, 20).with_id(ItemId(3)),
            NewItem::new("Washers", 10, 0).with_id(ItemId(5)),
        ]);
        state
    }

    fn press(view: &mut ItemsView, state: &AppState, k: &str) -> Vec<Action> {
        view.handle_event(
            &key_event(k),
            ItemsViewProps {
                state,
                is_focused: true,
            },
        )
    }

    #[test]
    fn test_cursor_keys() {
        let mut view = ItemsView::new();
        let state = state_with_items();

        press(&mut view, &state, "j").assert_first(Action::ItemsSelect(1));
        press(&mut view, &state, "G").assert_first(Action::ItemsSelect(1));
        press(&mut view, &state, "up").assert_first(Action::ItemsSelect(0));
    }

    #[test]
    fn test_item_actions_use_selected_id() {
        let mut view = ItemsView::new();
        let mut state = state_with_items();
        state.list.selected = 1;

        press(&mut view, &state, "w").assert_first(Action::ItemWithdraw(ItemId(5)));
        press(&mut view, &state, "d").assert_first(Action::ItemDelete(ItemId(5)));
        press(&mut view, &state, "enter").assert_first(Action::NavigateTo(Route::Qr(ItemId(5))));
    }

    #[test]
    fn test_item_actions_need_an_item() {
        let mut view = ItemsView::new();
        let state = AppState::default();
        press(&mut view, &state, "w").assert_empty();
        press(&mut view, &state, "d").assert_empty();
    }

    #[test]
    fn test_search_typing() {
        let mut view = ItemsView::new();
        let mut state = state_with_items();

        press(&mut view, &state, "/").assert_first(Action::SearchOpen);

        state.list.searching = true;
        press(&mut view, &state, "b").assert_first(Action::SearchQueryChange("b".into()));
        // List keys are text while searching
        press(&mut view, &state, "d").assert_first(Action::SearchQueryChange("d".into()));
        press(&mut view, &state, "esc").assert_first(Action::SearchClose);
    }

    #[test]
    fn test_esc_clears_filter() {
        let mut view = ItemsView::new();
        let mut state = state_with_items();
        press(&mut view, &state, "esc").assert_empty();

        state.list.filter = "bol".into();
        press(&mut view, &state, "esc").assert_first(Action::SearchClear);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut view = ItemsView::new();
        let state = state_with_items();
        view.handle_event(
            &key_event("r"),
            ItemsViewProps {
                state: &state,
                is_focused: false,
            },
        )
        .assert_empty();
    }

    #[test]
    fn test_render_rows() {
        let mut render = RenderHarness::new(60, 10);
        let mut view = ItemsView::new();
        let state = state_with_items();

        let output = render.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                ItemsViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Items (2)"));
        assert!(output.contains("Bolts"));
        assert!(output.contains("Washers"));
    }

    #[test]
    fn test_render_loading_placeholder() {
        let mut render = RenderHarness::new(60, 10);
        let mut view = ItemsView::new();
        let mut state = AppState::default();
        state.list.is_loading = true;

        let output = render.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                ItemsViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Loading items..."));
    }
}
