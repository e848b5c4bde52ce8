//! Modal form state and rendering
//!
//! A form is built fresh every time a modal opens, from the record
//! being edited or from defaults for a create. Nothing is kept between
//! openings, so a cancelled edit can never leak values into the next
//! one.

use std::collections::HashMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use pawdeck_core::validate::is_plausible_email;

/// Types of form fields supported
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    /// Path to an image file, encoded as a data URL on submit
    Image,
    Select,
}

/// Value storage for a single field
pub enum FieldValue {
    Text(Input),
    Selection { options: Vec<String>, selected: usize },
}

impl std::fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(input) => f
                .debug_struct("Text")
                .field("value", &input.value())
                .finish(),
            FieldValue::Selection { options, selected } => f
                .debug_struct("Selection")
                .field("options", options)
                .field("selected", selected)
                .finish(),
        }
    }
}

impl FieldValue {
    pub fn value(&self) -> String {
        match self {
            FieldValue::Text(input) => input.value().to_string(),
            FieldValue::Selection { options, selected } => {
                options.get(*selected).cloned().unwrap_or_default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(input) => input.value().trim().is_empty(),
            FieldValue::Selection { options, selected } => {
                options.get(*selected).map_or(true, |s| s.is_empty())
            }
        }
    }
}

#[derive(Debug)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub fn text(name: &str, label: &str, initial: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(Input::new(initial.to_string())),
            kind: FieldKind::Text,
            required: false,
        }
    }

    pub fn select(name: &str, label: &str, options: Vec<String>, current: &str) -> Self {
        let selected = options.iter().position(|o| o == current).unwrap_or(0);
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Selection { options, selected },
            kind: FieldKind::Select,
            required: false,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn cycle_selection(&mut self, forward: bool) {
        if let FieldValue::Selection { options, selected } = &mut self.value {
            if options.is_empty() {
                return;
            }
            *selected = if forward {
                (*selected + 1) % options.len()
            } else {
                (*selected + options.len() - 1) % options.len()
            };
        }
    }
}

/// State of an open modal form
#[derive(Debug)]
pub struct FormState {
    pub title: String,
    pub fields: Vec<FormField>,
    pub focused: usize,
    pub validation_errors: HashMap<String, String>,
    pub is_edit: bool,
    /// Verb shown in the Enter hint: "create", "save", "apply"
    pub submit_label: &'static str,
}

impl FormState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            focused: 0,
            validation_errors: HashMap::new(),
            is_edit: false,
            submit_label: "create",
        }
    }

    pub fn for_edit(title: impl Into<String>) -> Self {
        let mut form = Self::new(title);
        form.is_edit = true;
        form.submit_label = "save";
        form
    }

    pub fn submit_label(mut self, label: &'static str) -> Self {
        self.submit_label = label;
        self
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Route a key to the focused field
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            code => {
                if let Some(field) = self.fields.get_mut(self.focused) {
                    match &mut field.value {
                        FieldValue::Text(input) => {
                            input.handle_event(&Event::Key(key));
                        }
                        FieldValue::Selection { .. } => match code {
                            KeyCode::Left => field.cycle_selection(false),
                            KeyCode::Right | KeyCode::Char(' ') => field.cycle_selection(true),
                            _ => {}
                        },
                    }
                }
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.value())
    }

    /// Trimmed value, or None when the field is blank
    pub fn value_opt(&self, name: &str) -> Option<String> {
        self.value(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.value_opt(name).and_then(|v| v.parse().ok())
    }

    pub fn values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value.value()))
            .collect()
    }

    pub fn set_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.validation_errors.insert(field.into(), message.into());
    }

    /// Field-level checks: required, numeric parse, email plausibility.
    /// Cross-field rules run against the built payload, not here.
    pub fn validate(&mut self) -> bool {
        self.validation_errors.clear();
        for field in &self.fields {
            let value = field.value.value();
            let trimmed = value.trim();

            if field.required && trimmed.is_empty() {
                self.validation_errors
                    .insert(field.name.clone(), format!("{} is required", field.label));
                continue;
            }
            if trimmed.is_empty() {
                continue;
            }
            match field.kind {
                FieldKind::Number => {
                    if trimmed.parse::<f64>().is_err() {
                        self.validation_errors
                            .insert(field.name.clone(), format!("{} must be a number", field.label));
                    }
                }
                FieldKind::Email => {
                    if !is_plausible_email(trimmed) {
                        self.validation_errors.insert(
                            field.name.clone(),
                            format!("{} must be a valid email", field.label),
                        );
                    }
                }
                _ => {}
            }
        }
        self.validation_errors.is_empty()
    }
}

/// Read an image file and encode it as a base64 data URL, the format
/// the listing endpoints accept for the `image` field.
pub fn encode_image_file(path: &str) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mime = match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
}

/// Widget that renders a [`FormState`] as a centered overlay
pub struct FormWidget<'a> {
    form: &'a FormState,
}

impl<'a> FormWidget<'a> {
    pub fn new(form: &'a FormState) -> Self {
        Self { form }
    }
}

impl<'a> Widget for FormWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (self.form.fields.len() as u16 * 3 + 4).min(area.height);
        let width = (area.width * 3 / 5).clamp(40, 80).min(area.width);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" {} ", self.form.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let constraints: Vec<Constraint> = self
            .form
            .fields
            .iter()
            .map(|_| Constraint::Length(3))
            .chain(std::iter::once(Constraint::Min(1)))
            .collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (index, field) in self.form.fields.iter().enumerate() {
            let focused = index == self.form.focused;
            let error = self.form.validation_errors.get(&field.name);

            let border_style = if error.is_some() {
                Style::default().fg(Color::Red)
            } else if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let label = match error {
                Some(message) => format!(" {} - {} ", field.label, message),
                None => format!(" {} ", field.label),
            };

            let display = match (&field.value, &field.kind) {
                (FieldValue::Text(input), FieldKind::Password) => {
                    "*".repeat(input.value().chars().count())
                }
                (FieldValue::Text(input), _) => input.value().to_string(),
                (FieldValue::Selection { .. }, _) => format!("< {} >", field.value.value()),
            };

            Paragraph::new(display)
                .block(
                    Block::default()
                        .title(label)
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .render(rows[index], buf);
        }

        let hint = format!("Tab: next field  Enter: {}  Esc: cancel", self.form.submit_label);
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .render(rows[self.form.fields.len()], buf);
    }
}
