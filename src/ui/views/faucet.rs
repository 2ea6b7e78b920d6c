//! Faucet screen and the uplift details form.

use std::mem;

use tuirealm::{
    event::{Key, KeyEvent, KeyModifiers},
    tui::prelude::Rect,
    Frame,
};

use crate::{
    backend::{
        AppStateUpdate, BackendEvent, FaucetForm, FaucetSnapshot, FaucetTask, FormUpdate, Task,
        WalletTask,
    },
    ui::{
        form::{FormController, FormStatus, Input, InputStatus, TextInput},
        screen::{widgets::info::Info, ScreenCommandKey, ScreenController, ScreenFeedback},
    },
    Event,
};

const BASE_COMMANDS: [ScreenCommandKey; 3] = [
    ScreenCommandKey::new("q", "Quit"),
    ScreenCommandKey::new("c", "Connect wallet"),
    ScreenCommandKey::new("e", "Edit uplift details"),
];

#[memoize::memoize]
fn join_commands(can_request_tokens: bool) -> &'static [ScreenCommandKey] {
    let mut commands = BASE_COMMANDS.to_vec();

    if can_request_tokens {
        commands.push(ScreenCommandKey::new("g", "Get tokens"));
    }

    commands.leak()
}

pub(crate) struct FaucetScreenController {
    info: Info,
    snapshot: FaucetSnapshot,
}

impl FaucetScreenController {
    pub(crate) fn new(snapshot: FaucetSnapshot) -> Self {
        FaucetScreenController {
            info: info_for(&snapshot),
            snapshot,
        }
    }

    fn apply(&mut self, snapshot: &FaucetSnapshot) {
        self.snapshot = snapshot.clone();
        self.info = info_for(&self.snapshot);
    }
}

fn info_for(snapshot: &FaucetSnapshot) -> Info {
    if snapshot.outcome.error_message().is_some() {
        Info::new_error(&snapshot.description())
    } else {
        Info::new(&snapshot.description())
    }
}

impl ScreenController for FaucetScreenController {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        self.info.view(frame, area)
    }

    fn name(&self) -> &'static str {
        "Faucet"
    }

    fn command_keys(&self) -> &[ScreenCommandKey] {
        join_commands(self.snapshot.can_request_tokens())
    }

    fn on_event(&mut self, event: &Event) -> ScreenFeedback {
        match event {
            Event::Key(KeyEvent {
                code: Key::Char('q'),
                modifiers: KeyModifiers::NONE,
            }) => ScreenFeedback::Quit,

            Event::Key(KeyEvent {
                code: Key::Char('c'),
                modifiers: KeyModifiers::NONE,
            }) => ScreenFeedback::Task(Task::Wallet(WalletTask::Connect)),

            Event::Key(KeyEvent {
                code: Key::Char('e'),
                modifiers: KeyModifiers::NONE,
            }) => ScreenFeedback::Form(Box::new(UpliftFormController::new(
                self.snapshot.form.clone(),
            ))),

            Event::Key(KeyEvent {
                code: Key::Char('g'),
                modifiers: KeyModifiers::NONE,
            }) if self.snapshot.can_request_tokens() => {
                ScreenFeedback::Task(Task::Faucet(FaucetTask::RequestTokens))
            }

            Event::Key(key_event) => {
                if self.info.on_event(key_event) {
                    ScreenFeedback::Redraw
                } else {
                    ScreenFeedback::None
                }
            }

            Event::Backend(
                BackendEvent::AppStateUpdated(AppStateUpdate::Faucet(snapshot))
                | BackendEvent::TaskCompletedStateChange {
                    app_state_update: AppStateUpdate::Faucet(snapshot),
                    ..
                },
            ) => {
                self.apply(snapshot);
                ScreenFeedback::Redraw
            }

            Event::Backend(_) => ScreenFeedback::None,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum UpliftFormStep {
    Address,
    Action,
    Date,
}

struct UpliftFormController {
    step: UpliftFormStep,
    address: TextInput,
    action: TextInput,
    date: TextInput,
    /// Address shown when the form was opened
    initial_address: String,
    values: FormUpdate,
}

impl UpliftFormController {
    fn new(form: FaucetForm) -> Self {
        UpliftFormController {
            step: UpliftFormStep::Address,
            address: TextInput::new_init_value("Your wallet address (0x...)", &form.wallet_address),
            action: TextInput::new_init_value(
                "Describe your uplifting action",
                &form.uplift_action,
            ),
            date: TextInput::new_init_value("Date of uplifting", &form.uplift_date),
            initial_address: form.wallet_address,
            values: FormUpdate::default(),
        }
    }
}

impl FormController for UpliftFormController {
    fn on_event(&mut self, event: KeyEvent) -> FormStatus {
        let status = match self.step {
            UpliftFormStep::Address => self.address.on_event(event),
            UpliftFormStep::Action => self.action.on_event(event),
            UpliftFormStep::Date => self.date.on_event(event),
        };

        match status {
            InputStatus::Done(value) => match self.step {
                UpliftFormStep::Address => {
                    let address = value.trim();
                    self.values.wallet_address =
                        (address != self.initial_address).then(|| address.to_owned());
                    self.step = UpliftFormStep::Action;
                    FormStatus::Redraw
                }
                UpliftFormStep::Action => {
                    self.values.uplift_action = value;
                    self.step = UpliftFormStep::Date;
                    FormStatus::Redraw
                }
                UpliftFormStep::Date => {
                    self.values.uplift_date = value;
                    FormStatus::Done(Task::Faucet(FaucetTask::UpdateForm(mem::take(
                        &mut self.values,
                    ))))
                }
            },
            InputStatus::Redraw => FormStatus::Redraw,
            InputStatus::None => FormStatus::None,
            InputStatus::Exit => FormStatus::Exit,
        }
    }

    fn form_name(&self) -> &'static str {
        "Uplift details"
    }

    fn step_view(&mut self, frame: &mut Frame, area: Rect) {
        match self.step {
            UpliftFormStep::Address => self.address.view(frame, area),
            UpliftFormStep::Action => self.action.view(frame, area),
            UpliftFormStep::Date => self.date.view(frame, area),
        }
    }

    fn step_name(&self) -> &'static str {
        match self.step {
            UpliftFormStep::Address => "Wallet address",
            UpliftFormStep::Action => "Uplifting action",
            UpliftFormStep::Date => "Date",
        }
    }

    fn step_index(&self) -> u8 {
        self.step as u8
    }

    fn steps_number(&self) -> u8 {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{RequestOutcome, UpliftInfo};

    fn key(code: Key) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(form: &mut UpliftFormController, text: &str) {
        for c in text.chars() {
            form.on_event(key(Key::Char(c)));
        }
    }

    #[test]
    fn get_tokens_is_offered_only_with_an_address() {
        let mut screen = FaucetScreenController::new(FaucetSnapshot::default());
        assert!(screen.command_keys().iter().all(|c| c.keybinding != "g"));
        assert!(matches!(
            screen.on_event(&Event::Key(key(Key::Char('g')))),
            ScreenFeedback::None
        ));

        let mut snapshot = FaucetSnapshot::default();
        snapshot.form.wallet_address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_owned();
        screen.on_event(&Event::Backend(BackendEvent::AppStateUpdated(
            AppStateUpdate::Faucet(snapshot),
        )));

        assert!(screen.command_keys().iter().any(|c| c.keybinding == "g"));
        assert!(matches!(
            screen.on_event(&Event::Key(key(Key::Char('g')))),
            ScreenFeedback::Task(Task::Faucet(FaucetTask::RequestTokens))
        ));
    }

    #[test]
    fn form_collects_three_fields_into_update_task() {
        let mut form = UpliftFormController::new(FaucetForm::default());

        type_text(&mut form, "0xabc");
        form.on_event(key(Key::Enter));
        type_text(&mut form, "Helped a neighbour");
        form.on_event(key(Key::Enter));
        assert_eq!(form.step_index(), 2);
        type_text(&mut form, "2024-05-01");

        let FormStatus::Done(task) = form.on_event(key(Key::Enter)) else {
            panic!("form must be done after the date");
        };
        assert_eq!(
            task,
            Task::Faucet(FaucetTask::UpdateForm(FormUpdate {
                wallet_address: Some("0xabc".to_owned()),
                uplift_action: "Helped a neighbour".to_owned(),
                uplift_date: "2024-05-01".to_owned(),
            }))
        );
    }

    #[test]
    fn untouched_address_is_not_sent() {
        let mut form = UpliftFormController::new(FaucetForm {
            wallet_address: "0xaaa".to_owned(),
            uplift_action: "Planted a tree".to_owned(),
            ..Default::default()
        });

        form.on_event(key(Key::Enter));
        form.on_event(key(Key::Enter));
        type_text(&mut form, "yesterday");

        let FormStatus::Done(task) = form.on_event(key(Key::Enter)) else {
            panic!("form must be done after the date");
        };
        assert_eq!(
            task,
            Task::Faucet(FaucetTask::UpdateForm(FormUpdate {
                wallet_address: None,
                uplift_action: "Planted a tree".to_owned(),
                uplift_date: "yesterday".to_owned(),
            }))
        );
    }

    #[test]
    fn ignored_submit_keeps_previous_outcome_on_screen() {
        // session closed after a successful request, address typed by hand
        let snapshot = FaucetSnapshot {
            form: FaucetForm {
                wallet_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_owned(),
                ..Default::default()
            },
            connected: false,
            outcome: RequestOutcome::Succeeded {
                message: "Uplifting completed!".to_owned(),
                transaction_hash: "0xdeadbeef".to_owned(),
                uplift: UpliftInfo::default(),
            },
        };
        let mut screen = FaucetScreenController::new(snapshot.clone());

        assert!(matches!(
            screen.on_event(&Event::Key(key(Key::Char('g')))),
            ScreenFeedback::Task(Task::Faucet(FaucetTask::RequestTokens))
        ));
        assert!(matches!(
            screen.on_event(&Event::Backend(BackendEvent::None)),
            ScreenFeedback::None
        ));

        assert_eq!(screen.snapshot, snapshot);
        assert!(screen.snapshot.description().contains("0xdeadbeef"));
    }

    #[test]
    fn published_reset_clears_outcome_on_screen() {
        let mut screen = FaucetScreenController::new(FaucetSnapshot {
            outcome: RequestOutcome::Failed {
                message: "insufficient funds".to_owned(),
            },
            ..Default::default()
        });

        screen.on_event(&Event::Backend(BackendEvent::AppStateUpdated(
            AppStateUpdate::Faucet(FaucetSnapshot::default()),
        )));

        assert_eq!(screen.snapshot.outcome, RequestOutcome::Idle);
        assert!(!screen.snapshot.description().contains("insufficient funds"));
    }

    #[test]
    fn escape_leaves_form() {
        let mut form = UpliftFormController::new(FaucetForm::default());
        assert!(matches!(form.on_event(key(Key::Esc)), FormStatus::Exit));
    }
}
