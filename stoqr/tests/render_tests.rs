//! Full-screen rendering through the router

use stoqr::testing::{key_event, RenderHarness};
use stoqr::StoqrUi;
use stoqr_core::{reducer, Action, AppState, ItemId, NewItem, Notice, Route};

fn state_with_items() -> AppState {
    let mut state = AppState::new("https://stoqr.example.com");
    state.cache.replace_all(vec![
        NewItem::new("Bolts", 10, 3).with_id(ItemId(1)),
        NewItem::new("Nuts", 2, 5).with_id(ItemId(2)),
        NewItem::new("Widget", 4, 0).with_id(ItemId(42)),
    ]);
    state
}

fn render(ui: &mut StoqrUi, state: &AppState) -> String {
    let mut harness = RenderHarness::new(80, 20);
    harness.render_to_string_plain(|frame| {
        let area = frame.area();
        ui.render(frame, area, state);
    })
}

#[test]
fn test_items_screen() {
    let mut ui = StoqrUi::new();
    let state = state_with_items();

    let output = render(&mut ui, &state);

    assert!(output.contains("STOQR"));
    assert!(output.contains("Widget"));
    let widget = output.lines().find(|l| l.contains("Widget")).expect("row");
    assert!(widget.contains("42"));
    assert!(output.contains("1 out of stock"));
    assert!(output.contains("search"));
}

#[test]
fn test_report_screen_shows_signed_needed() {
    let mut ui = StoqrUi::new();
    let mut state = state_with_items();
    state.route = Route::Report;

    let output = render(&mut ui, &state);

    let nuts = output.lines().find(|l| l.contains("Nuts")).expect("row");
    assert!(nuts.contains("-3"));
    let bolts = output.lines().find(|l| l.contains("Bolts")).expect("row");
    assert!(bolts.contains('7'));
}

#[test]
fn test_notice_replaces_hints() {
    let mut ui = StoqrUi::new();
    let mut state = state_with_items();
    state.notice = Some(Notice::error("Could not reach the server"));

    let output = render(&mut ui, &state);

    assert!(output.contains("Could not reach the server"));
    assert!(output.contains("x to dismiss"));
}

#[test]
fn test_keys_drive_the_state() {
    let mut ui = StoqrUi::new();
    let mut state = state_with_items();

    // Open the create form and type a name
    for k in ["2", "B", "o", "x"] {
        let actions = ui.map_event(&key_event(k), &state).actions;
        for action in actions {
            reducer(&mut state, action);
        }
    }
    assert_eq!(state.route, Route::Create);
    assert_eq!(state.form.name, "Box");

    let output = render(&mut ui, &state);
    assert!(output.contains("New item"));
    assert!(output.contains("Box"));

    // Esc leaves the form, after which digits are shortcuts again
    for k in ["esc", "3"] {
        for action in ui.map_event(&key_event(k), &state).actions {
            reducer(&mut state, action);
        }
    }
    assert_eq!(state.route, Route::Report);
}

#[test]
fn test_quit_from_any_screen() {
    let mut ui = StoqrUi::new();
    let mut state = state_with_items();
    state.route = Route::Qr(ItemId(42));

    assert_eq!(
        ui.map_event(&key_event("q"), &state).actions,
        vec![Action::Quit]
    );
}
