//! `/items/create` - name, desired and actual inputs

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use stoqr_core::{Action, CreateForm, FormField, Route};

use super::{Component, TextInput, TextInputProps};
use crate::event::EventKind;

pub struct CreateFormViewProps<'a> {
    pub form: &'a CreateForm,
    pub is_focused: bool,
}

/// One text input per field; `tab` cycles, `enter` submits, `esc` cancels
#[derive(Default)]
pub struct CreateFormView {
    name: TextInput,
    desired: TextInput,
    actual: TextInput,
}

impl CreateFormView {
    pub fn new() -> Self {
        Self::default()
    }

    fn input(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::Name => &mut self.name,
            FormField::Desired => &mut self.desired,
            FormField::Actual => &mut self.actual,
        }
    }
}

fn on_change(field: FormField) -> fn(String) -> Action {
    match field {
        FormField::Name => |v| Action::FormFieldChange(FormField::Name, v),
        FormField::Desired => |v| Action::FormFieldChange(FormField::Desired, v),
        FormField::Actual => |v| Action::FormFieldChange(FormField::Actual, v),
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Name => "e.g. M6 bolts",
        FormField::Desired | FormField::Actual => "0",
    }
}

fn input_props(form: &CreateForm, field: FormField, is_focused: bool) -> TextInputProps<'_, Action> {
    TextInputProps {
        value: form.value(field),
        placeholder: placeholder(field),
        label: field.label(),
        is_focused,
        is_invalid: form.error.as_ref().is_some_and(|e| e.field() == field),
        on_change: on_change(field),
        on_submit: |_| Action::FormSubmit,
    }
}

impl Component<Action> for CreateFormView {
    type Props<'a> = CreateFormViewProps<'a>;

    // `'a: 'a` makes 'a early-bound to match the trait's RPITIT signature
    fn handle_event<'a>(&mut self, event: &EventKind, props: Self::Props<'a>) -> Vec<Action>
    where
        'a: 'a,
    {
        if !props.is_focused {
            return vec![];
        }
        let form = props.form;

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Tab | KeyCode::Down => return vec![Action::FormFocus(form.focus.next())],
                KeyCode::BackTab | KeyCode::Up => {
                    return vec![Action::FormFocus(form.focus.prev())]
                }
                KeyCode::Esc => return vec![Action::NavigateTo(Route::Items)],
                _ => {}
            }
        }

        self.input(form.focus)
            .handle_event(event, input_props(form, form.focus, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CreateFormViewProps<'_>) {
        let form = props.form;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" New item ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        for (i, field) in FormField::ALL.into_iter().enumerate() {
            let focused = props.is_focused && form.focus == field;
            self.input(field)
                .render(frame, rows[i], input_props(form, field, focused));
        }

        let message = match &form.error {
            Some(error) => Line::from(error.to_string()).style(Style::default().fg(Color::Red)),
            None => Line::from("enter to save, esc to cancel")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(message), rows[3]);
    }
}
