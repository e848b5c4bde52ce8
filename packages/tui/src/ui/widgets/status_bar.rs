use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::screens::Screen;
use crate::state::{AppState, ModalState};

/// Bottom bar: key hints on the left, session identity on the right
pub struct StatusBarWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> &'static str {
        if self.state.search_active {
            return "type to search  Enter/Esc: leave search";
        }
        match &self.state.modal {
            ModalState::Closed if self.state.screen == Screen::Promotions => {
                "Tab: screen  j/k: row  [/]: page  /: search  n: new  e: edit  d: delete  t: toggle active  r: refresh  q: quit"
            }
            ModalState::Closed => {
                "Tab: screen  j/k: row  [/]: page  /: search  n: new  e: edit  d: delete  f: filter  r: refresh  q: quit"
            }
            ModalState::ConfirmDelete { .. } => "Tab: switch button  Enter: choose  Esc: cancel",
            ModalState::Filter(_) => "Tab: field  Enter: apply  Ctrl+R: reset  Esc: cancel",
            _ => "Tab: field  Enter: save  Esc: cancel",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sections = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(32)])
            .split(area);

        Paragraph::new(self.hints())
            .style(Style::default().fg(Color::DarkGray))
            .render(sections[0], buf);

        let identity = match &self.state.user_email {
            Some(email) => format!("{} ", email),
            None => "not logged in ".to_string(),
        };
        Paragraph::new(identity)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Right)
            .render(sections[1], buf);
    }
}
