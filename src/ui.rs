//! UI definitions and state.

mod form;
mod screen;
mod status_bar;
mod views;

use tuirealm::{
    tui::prelude::{Constraint, Direction, Layout},
    Frame,
};

use self::{
    form::{Form, FormController, FormStatus},
    screen::{Screen, ScreenFeedback},
    status_bar::StatusBarState,
    views::faucet::FaucetScreenController,
};
use crate::{
    backend::{AppStateUpdate, BackendEvent, FaucetSnapshot, Task},
    Event,
};

/// What the main loop should do after the UI processed an event.
pub enum UiFeedback {
    Quit,
    ExecuteTask(Task),
    Redraw,
    None,
}

/// The faucet screen with an optional form drawn over it and a status bar on
/// top.
pub struct Ui {
    screen: Screen<FaucetScreenController>,
    form: Option<Form<Box<dyn FormController>>>,
    status_bar_state: StatusBarState,
}

impl Ui {
    pub fn new(snapshot: FaucetSnapshot) -> Self {
        Ui {
            status_bar_state: StatusBarState::new(&snapshot),
            screen: Screen::new(FaucetScreenController::new(snapshot)),
            form: None,
        }
    }

    pub fn view(&mut self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Max(3), Constraint::Min(10)].as_ref())
            .split(frame.size());

        self.status_bar_state.view(frame, layout[0]);

        if let Some(form) = &mut self.form {
            form.view(frame, layout[1]);
        } else {
            self.screen.view(frame, layout[1]);
        }
    }

    /// Must be called for each task handed to the backend, the status bar
    /// shows whether something is still running.
    pub fn task_started(&mut self) {
        self.status_bar_state.task_started();
    }

    pub fn on_event(&mut self, event: Event) -> UiFeedback {
        match event {
            Event::Key(key_event) => {
                if let Some(form) = &mut self.form {
                    match form.on_event(key_event) {
                        FormStatus::Done(task) => {
                            self.form = None;
                            UiFeedback::ExecuteTask(task)
                        }
                        FormStatus::Exit => {
                            self.form = None;
                            UiFeedback::Redraw
                        }
                        FormStatus::Redraw => UiFeedback::Redraw,
                        FormStatus::None => UiFeedback::None,
                    }
                } else {
                    let feedback = self.screen.on_event(&Event::Key(key_event));
                    self.apply_screen_feedback(feedback)
                }
            }
            Event::Backend(backend_event) => {
                // intermediate state of a task that is still running
                if !matches!(backend_event, BackendEvent::AppStateUpdated(_)) {
                    self.status_bar_state.task_finished();
                }

                if let BackendEvent::AppStateUpdated(AppStateUpdate::Faucet(snapshot))
                | BackendEvent::TaskCompletedStateChange {
                    app_state_update: AppStateUpdate::Faucet(snapshot),
                    ..
                } = &backend_event
                {
                    self.status_bar_state.update(snapshot);
                }

                let feedback = self.screen.on_event(&Event::Backend(backend_event));
                match self.apply_screen_feedback(feedback) {
                    // status bar may have changed anyway
                    UiFeedback::None => UiFeedback::Redraw,
                    feedback => feedback,
                }
            }
        }
    }

    fn apply_screen_feedback(&mut self, feedback: ScreenFeedback) -> UiFeedback {
        match feedback {
            ScreenFeedback::Form(controller) => {
                self.form = Some(Form::new(controller));
                UiFeedback::Redraw
            }
            ScreenFeedback::Task(task) => UiFeedback::ExecuteTask(task),
            ScreenFeedback::Redraw => UiFeedback::Redraw,
            ScreenFeedback::Quit => UiFeedback::Quit,
            ScreenFeedback::None => UiFeedback::None,
        }
    }
}
