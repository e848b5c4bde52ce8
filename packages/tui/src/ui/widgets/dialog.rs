//! Confirm-delete dialog
//!
//! Focus starts on Cancel so a reflexive Enter never destroys a record.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult {
    Confirmed,
    Cancelled,
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogFocus {
    Cancel,
    Confirm,
}

#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub focus: DialogFocus,
}

impl ConfirmDialog {
    pub fn delete(subject: impl Into<String>) -> Self {
        Self {
            title: "Confirm Delete".to_string(),
            message: format!("Delete {}? This cannot be undone.", subject.into()),
            confirm_text: "Delete".to_string(),
            focus: DialogFocus::Cancel,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DialogFocus::Cancel => DialogFocus::Confirm,
            DialogFocus::Confirm => DialogFocus::Cancel,
        };
    }

    pub fn handle_key(&mut self, key: KeyCode) -> DialogResult {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.toggle_focus();
                DialogResult::Pending
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                DialogFocus::Cancel => DialogResult::Cancelled,
                DialogFocus::Confirm => DialogResult::Confirmed,
            },
            KeyCode::Esc => DialogResult::Cancelled,
            _ => DialogResult::Pending,
        }
    }
}

pub struct ConfirmDialogWidget<'a> {
    dialog: &'a ConfirmDialog,
}

impl<'a> ConfirmDialogWidget<'a> {
    pub fn new(dialog: &'a ConfirmDialog) -> Self {
        Self { dialog }
    }
}

impl<'a> Widget for ConfirmDialogWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.dialog.message.len() as u16 + 6).clamp(40, 64).min(area.width);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(7)) / 2,
            width,
            height: 7.min(area.height),
        };

        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.dialog.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        Paragraph::new(self.dialog.message.as_str())
            .wrap(ratatui::widgets::Wrap { trim: true })
            .render(rows[0], buf);

        let cancel_style = if self.dialog.focus == DialogFocus::Cancel {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };
        let confirm_style = if self.dialog.focus == DialogFocus::Confirm {
            Style::default().fg(Color::White).bg(Color::Red)
        } else {
            Style::default().fg(Color::Red)
        };

        let buttons = Line::from(vec![
            Span::styled(" [ Cancel ] ", cancel_style),
            Span::raw("  "),
            Span::styled(format!(" [ {} ] ", self.dialog.confirm_text), confirm_style),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(rows[1], buf);
    }
}
