//! Table presentation shared by every screen

use pawdeck_core::StatusTone;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub width: Constraint,
}

impl Column {
    pub const fn new(header: &'static str, width: Constraint) -> Self {
        Self { header, width }
    }
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// Selection and pagination state for one screen's table
#[derive(Debug, Default)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    pub selected: Option<usize>,
    pub page: u32,
    pub last_page: u32,
    pub total: u64,
    pub loading: bool,
}

impl TableView {
    pub fn new() -> Self {
        Self {
            page: 1,
            last_page: 1,
            ..Default::default()
        }
    }

    /// Replace the rows after a fetch, keeping the selection in range
    pub fn set_rows(&mut self, rows: Vec<TableRow>, page: u32, last_page: u32, total: u64) {
        self.selected = match (self.selected, rows.len()) {
            (_, 0) => None,
            (Some(index), len) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        self.rows = rows;
        self.page = page;
        self.last_page = last_page.max(1);
        self.total = total;
        self.loading = false;
    }

    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) => (index + 1).min(self.rows.len() - 1),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| index.saturating_sub(1)));
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.rows.get(index))
            .map(|row| row.id.as_str())
    }

    /// Page to request next, or None when already on the last page
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.last_page).then(|| self.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }
}

fn tone_style(status: &str) -> Style {
    match StatusTone::classify(status) {
        StatusTone::Positive => Style::default().fg(Color::Green),
        StatusTone::Muted => Style::default().fg(Color::DarkGray),
        StatusTone::Negative => Style::default().fg(Color::Red),
        StatusTone::Pending => Style::default().fg(Color::Yellow),
        StatusTone::Neutral => Style::default().fg(Color::White),
    }
}

pub struct TableWidget<'a> {
    view: &'a TableView,
    columns: &'a [Column],
    title: String,
    /// Index of the column rendered with a status tone color
    status_column: Option<usize>,
}

impl<'a> TableWidget<'a> {
    pub fn new(
        view: &'a TableView,
        columns: &'a [Column],
        title: impl Into<String>,
        status_column: Option<usize>,
    ) -> Self {
        Self {
            view,
            columns,
            title: title.into(),
            status_column,
        }
    }
}

impl<'a> StatefulWidget for TableWidget<'a> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        state.select(self.view.selected);

        let header = Row::new(
            self.columns
                .iter()
                .map(|column| Cell::from(column.header))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .view
            .rows
            .iter()
            .map(|row| {
                Row::new(
                    row.cells
                        .iter()
                        .enumerate()
                        .map(|(index, cell)| {
                            let mut rendered = Cell::from(cell.as_str());
                            if Some(index) == self.status_column {
                                rendered = rendered.style(tone_style(cell));
                            }
                            rendered
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let footer = if self.view.loading {
            format!(" {} - loading... ", self.title)
        } else {
            format!(
                " {} - page {}/{} ({} total) ",
                self.title, self.view.page, self.view.last_page, self.view.total
            )
        };

        let widths: Vec<Constraint> = self.columns.iter().map(|column| column.width).collect();
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(footer).borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(40, 40, 60))
                    .add_modifier(Modifier::BOLD),
            );

        StatefulWidget::render(table, area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> TableRow {
        TableRow {
            id: id.to_string(),
            cells: vec![id.to_string()],
        }
    }

    #[test]
    fn selection_stays_in_range_when_rows_shrink() {
        let mut view = TableView::new();
        view.set_rows(vec![row("1"), row("2"), row("3")], 1, 1, 3);
        view.select_next();
        view.select_next();
        assert_eq!(view.selected_id(), Some("3"));

        view.set_rows(vec![row("1"), row("2")], 1, 1, 2);
        assert_eq!(view.selected_id(), Some("2"));

        view.set_rows(vec![], 1, 1, 0);
        assert_eq!(view.selected_id(), None);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut view = TableView::new();
        view.set_rows(vec![row("1"), row("2")], 1, 1, 2);
        view.select_prev();
        assert_eq!(view.selected_id(), Some("1"));
        view.select_next();
        view.select_next();
        assert_eq!(view.selected_id(), Some("2"));
    }

    #[test]
    fn page_navigation_respects_bounds() {
        let mut view = TableView::new();
        view.set_rows(vec![row("1")], 1, 3, 25);
        assert_eq!(view.prev_page(), None);
        assert_eq!(view.next_page(), Some(2));

        view.set_rows(vec![row("1")], 3, 3, 25);
        assert_eq!(view.next_page(), None);
        assert_eq!(view.prev_page(), Some(2));
    }
}
