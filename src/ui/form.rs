//! Form component defintion.

mod text_input;

use std::ops::{Deref, DerefMut};

use tuirealm::{
    event::KeyEvent,
    props::{Alignment, BorderSides},
    tui::{prelude::Rect, widgets::Block},
    Frame,
};

pub(crate) use self::text_input::TextInput;
use crate::backend::Task;

/// Trait of every component suitable for processing user input.
pub(crate) trait Input {
    type Output;

    fn on_event(&mut self, event: KeyEvent) -> InputStatus<Self::Output>;

    fn view(&mut self, frame: &mut Frame, area: Rect);
}

/// [Input] result of processing a key event.
pub(crate) enum InputStatus<T> {
    /// Input is complete and a value is returned
    Done(T),
    /// Input is incomplete, but requires a view update
    Redraw,
    /// Input is incomplete and the key event was discarded
    None,
    /// User gave up on the input
    Exit,
}

/// Form is a component that is responsible for handling key events and drawing
/// inputs accordingly. The generic parameter separates one form from another.
pub(crate) struct Form<C: FormController> {
    controller: C,
}

impl<C: FormController> Form<C> {
    pub(crate) fn new(controller: C) -> Self {
        Form { controller }
    }

    pub(crate) fn on_event(&mut self, event: KeyEvent) -> FormStatus {
        self.controller.on_event(event)
    }

    pub(crate) fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::new()
            .borders(BorderSides::ALL)
            .title(format!(
                "{}: {} [{} / {}]",
                self.controller.form_name(),
                self.controller.step_name(),
                self.controller.step_index() + 1,
                self.controller.steps_number()
            ))
            .title_alignment(Alignment::Left);
        self.controller.step_view(frame, block.inner(area));
        frame.render_widget(block, area);
    }
}

/// Status of the whole form. When all inputs are done a [FormController]
/// turns their values into a [Task].
pub(crate) enum FormStatus {
    Done(Task),
    Redraw,
    None,
    Exit,
}

/// A generic form knows how to draw itself, the controller defines the steps
/// and what the collected data turns into.
pub(crate) trait FormController {
    /// Process a key event
    fn on_event(&mut self, event: KeyEvent) -> FormStatus;

    /// The form title
    fn form_name(&self) -> &'static str;

    /// Draw current input
    fn step_view(&mut self, frame: &mut Frame, area: Rect);

    /// Current step title
    fn step_name(&self) -> &'static str;

    /// Current step index
    fn step_index(&self) -> u8;

    /// Number of all form steps
    fn steps_number(&self) -> u8;
}

impl FormController for Box<dyn FormController> {
    fn on_event(&mut self, event: KeyEvent) -> FormStatus {
        self.deref_mut().on_event(event)
    }

    fn form_name(&self) -> &'static str {
        self.deref().form_name()
    }

    fn step_view(&mut self, frame: &mut Frame, area: Rect) {
        self.deref_mut().step_view(frame, area)
    }

    fn step_name(&self) -> &'static str {
        self.deref().step_name()
    }

    fn step_index(&self) -> u8 {
        self.deref().step_index()
    }

    fn steps_number(&self) -> u8 {
        self.deref().steps_number()
    }
}
