//! Screen module.

pub(crate) mod widgets;

use tuirealm::{
    tui::prelude::{Constraint, Direction, Layout, Rect},
    Frame,
};

use self::widgets::command_pallet;
use super::form::FormController;
use crate::{backend::Task, Event};

/// Screen consists of two blocks:
/// 1. an info block that represents the faucet state, optionally scrollable,
/// 2. a command pallet: a table of keystrokes for commands available right
///    now, it acts like a help.
///
/// Drawing is the same for any screen, what keys to show and how to process
/// them is up to a [ScreenController].
pub(crate) struct Screen<C: ScreenController> {
    controller: C,
}

impl<C: ScreenController> Screen<C> {
    pub(crate) fn new(controller: C) -> Self {
        Screen { controller }
    }

    pub(crate) fn view(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Max(4)].as_ref())
            .split(area);

        self.controller.view(frame, layout[0]);
        command_pallet::view(frame, layout[1], &self.controller);
    }

    pub(crate) fn on_event(&mut self, event: &Event) -> ScreenFeedback {
        self.controller.on_event(event)
    }
}

/// A screen controller provides keystrokes information and dispatches key
/// and backend events.
pub(crate) trait ScreenController {
    fn view(&mut self, frame: &mut Frame, area: Rect);

    fn name(&self) -> &'static str;

    fn command_keys(&self) -> &[ScreenCommandKey];

    /// Process an event, returning details on what's needed to be updated on
    /// UI.
    fn on_event(&mut self, event: &Event) -> ScreenFeedback;
}

type Keybinding = &'static str;

#[derive(Clone)]
pub(crate) struct ScreenCommandKey {
    pub keybinding: Keybinding,
    pub description: &'static str,
}

impl ScreenCommandKey {
    pub(crate) const fn new(keybinding: Keybinding, description: &'static str) -> Self {
        ScreenCommandKey {
            keybinding,
            description,
        }
    }
}

pub(crate) enum ScreenFeedback {
    Form(Box<dyn FormController>),
    Task(Task),
    Redraw,
    Quit,
    None,
}
