//! Free text input component.

use tuirealm::{
    command::{Cmd, Direction},
    event::{Key, KeyEvent, KeyModifiers},
    props::{BorderSides, Borders, Color, Style},
    tui::prelude::Rect,
    AttrValue, Attribute, Frame, MockComponent,
};

use super::{Input, InputStatus};

pub(crate) struct TextInput {
    input: tui_realm_stdlib::Input,
}

impl TextInput {
    pub(crate) fn new_init_value(placeholder: &'static str, value: &str) -> Self {
        let mut input = tui_realm_stdlib::Input::default()
            .borders(Borders::default().sides(BorderSides::NONE))
            .placeholder(placeholder, Style::default().fg(Color::Gray))
            .value(value);
        input.attr(Attribute::Focus, AttrValue::Flag(true));

        TextInput { input }
    }
}

impl Input for TextInput {
    type Output = String;

    fn on_event(&mut self, event: KeyEvent) -> InputStatus<Self::Output> {
        match event {
            KeyEvent {
                code: Key::Enter,
                modifiers: KeyModifiers::NONE,
            } => InputStatus::Done(self.input.state().unwrap_one().unwrap_string()),
            KeyEvent {
                code: Key::Esc, ..
            }
            | KeyEvent {
                code: Key::Char('q'),
                modifiers: KeyModifiers::CONTROL,
            } => InputStatus::Exit,
            KeyEvent {
                code: Key::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            } => {
                self.input.perform(Cmd::Type(c));
                InputStatus::Redraw
            }
            KeyEvent {
                code: Key::Left, ..
            } => {
                self.input.perform(Cmd::Move(Direction::Left));
                InputStatus::Redraw
            }
            KeyEvent {
                code: Key::Right,
                ..
            } => {
                self.input.perform(Cmd::Move(Direction::Right));
                InputStatus::Redraw
            }
            KeyEvent {
                code: Key::Backspace,
                ..
            } => {
                self.input.perform(Cmd::Delete);
                InputStatus::Redraw
            }
            _ => InputStatus::None,
        }
    }

    fn view(&mut self, frame: &mut Frame, area: Rect) {
        self.input.view(frame, area);
    }
}
