//! Status bar component definitions.

use tui_realm_stdlib::Label;
use tuirealm::{
    props::{Alignment, BorderSides},
    tui::{
        prelude::{Constraint, Direction, Layout, Rect},
        widgets::Block,
    },
    Frame, MockComponent,
};

use crate::backend::FaucetSnapshot;

const TITLE: &str = "Uplift Coin (UPLC)";

#[derive(Default)]
pub(crate) struct StatusBarState {
    connection: String,
    in_flight: usize,
}

impl StatusBarState {
    pub(crate) fn new(snapshot: &FaucetSnapshot) -> Self {
        StatusBarState {
            connection: snapshot.connection_label(),
            in_flight: 0,
        }
    }

    pub(crate) fn update(&mut self, snapshot: &FaucetSnapshot) {
        self.connection = snapshot.connection_label();
    }

    pub(crate) fn task_started(&mut self) {
        self.in_flight += 1;
    }

    pub(crate) fn task_finished(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub(crate) fn view(&self, frame: &mut Frame, area: Rect) {
        let block = Block::new()
            .borders(BorderSides::ALL)
            .title(TITLE)
            .title_alignment(Alignment::Left);

        let layout = Layout::default()
            .horizontal_margin(1)
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Max(30)].as_ref())
            .split(block.inner(area));

        let activity = if self.in_flight > 0 {
            "Waiting for the wallet".to_owned()
        } else {
            String::new()
        };

        Label::default().text(&activity).view(frame, layout[0]);
        Label::default()
            .text(&self.connection)
            .alignment(Alignment::Right)
            .view(frame, layout[1]);

        frame.render_widget(block, area);
    }
}
