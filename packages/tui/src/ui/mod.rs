//! Frame composition: tab strip, search line, table, status bar, and
//! whichever modal overlay is open.

pub mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, TableState, Tabs};

use crate::screens::Screen;
use crate::state::{AppState, ModalState, ToastKind};
use widgets::dialog::ConfirmDialogWidget;
use widgets::form::FormWidget;
use widgets::status_bar::StatusBarWidget;
use widgets::table::TableWidget;

pub fn render(frame: &mut Frame, state: &AppState) {
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, state, areas[0]);
    render_search(frame, state, areas[1]);
    render_table(frame, state, areas[2]);
    frame.render_widget(StatusBarWidget::new(state), areas[3]);

    match &state.modal {
        ModalState::Closed => {}
        ModalState::Create(form) | ModalState::Filter(form) => {
            frame.render_widget(FormWidget::new(form), frame.area());
        }
        ModalState::Edit { form, .. } => match form {
            Some(form) => frame.render_widget(FormWidget::new(form), frame.area()),
            None => render_loading_overlay(frame),
        },
        ModalState::ConfirmDelete { dialog, .. } => {
            frame.render_widget(ConfirmDialogWidget::new(dialog), frame.area());
        }
    }

    render_toasts(frame, state);
}

fn render_tabs(frame: &mut Frame, state: &AppState, area: Rect) {
    let titles: Vec<Line> = Screen::ALL.iter().map(|s| Line::from(s.title())).collect();
    let selected = Screen::ALL
        .iter()
        .position(|s| *s == state.screen)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, state: &AppState, area: Rect) {
    let style = if state.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(state.search_text()).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(style),
    );
    frame.render_widget(search, area);

    if state.search_active {
        let cursor_x = area.x + 1 + state.search_input.visual_cursor() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_table(frame: &mut Frame, state: &AppState, area: Rect) {
    let screen = state.screen;
    let mut table_state = TableState::default();
    frame.render_stateful_widget(
        TableWidget::new(
            state.table(),
            screen.columns(),
            screen.title(),
            screen.status_column(),
        ),
        area,
        &mut table_state,
    );
}

fn render_loading_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup = Rect {
        x: area.x + area.width.saturating_sub(30) / 2,
        y: area.y + area.height.saturating_sub(3) / 2,
        width: 30.min(area.width),
        height: 3.min(area.height),
    };
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(
        Paragraph::new("Loading record...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

fn render_toasts(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    for (index, toast) in state.toasts.iter().rev().take(3).enumerate() {
        let width = (toast.message.len() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y + 2 + index as u16 * 3,
            width,
            height: 3,
        };
        if rect.bottom() > area.bottom() {
            break;
        }
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        };
        frame.render_widget(ratatui::widgets::Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            rect,
        );
    }
}
