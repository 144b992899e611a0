//! Course form component
//!
//! Shared form for creating a course and editing an existing one. Name,
//! methodology, and tier are required; area is optional and an empty value
//! leaves the course unassigned.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::course::{Course, CourseDraft};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Whether the form creates a new course or updates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

const FIELD_COUNT: usize = 4;

const FIELD_LABELS: [&str; FIELD_COUNT] = ["Name", "Area", "Methodology", "Price Tier"];

/// Create/edit course form
pub struct CourseForm {
    pub mode: FormMode,
    /// Field values in label order: name, area, methodology, tier
    pub fields: [String; FIELD_COUNT],
    /// Index of the focused field
    pub focused: usize,
    /// Validation error to display
    pub error: Option<String>,
}

impl Default for CourseForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            fields: Default::default(),
            focused: 0,
            error: None,
        }
    }

    /// Reset to an empty create form
    pub fn reset_create(&mut self) {
        self.mode = FormMode::Create;
        self.fields = Default::default();
        self.focused = 0;
        self.error = None;
    }

    /// Pre-fill the form from an existing course for editing
    pub fn load_course(&mut self, course: &Course) {
        self.mode = FormMode::Edit(course.id);
        self.fields = [
            course.name.clone(),
            course.area.clone().unwrap_or_default(),
            course.methodology.clone(),
            course.tier.clone(),
        ];
        self.focused = 0;
        self.error = None;
    }

    fn next_field(&mut self) {
        self.focused = (self.focused + 1) % FIELD_COUNT;
    }

    fn prev_field(&mut self) {
        self.focused = if self.focused == 0 {
            FIELD_COUNT - 1
        } else {
            self.focused - 1
        };
    }

    /// Validate required fields and build the request body
    fn build_draft(&mut self) -> Option<CourseDraft> {
        self.error = None;

        let name = self.fields[0].trim();
        let methodology = self.fields[2].trim();
        let tier = self.fields[3].trim();

        if name.is_empty() {
            self.error = Some("Name is required".to_string());
            self.focused = 0;
            return None;
        }
        if methodology.is_empty() {
            self.error = Some("Methodology is required".to_string());
            self.focused = 2;
            return None;
        }
        if tier.is_empty() {
            self.error = Some("Price tier is required".to_string());
            self.focused = 3;
            return None;
        }

        // The backend only touches keys present in the body, so an edit that
        // clears the area must still send it (empty) to unassign it. On
        // create an absent area already means unassigned.
        let area = self.fields[1].trim();
        let area = if !area.is_empty() {
            Some(area.to_string())
        } else if matches!(self.mode, FormMode::Edit(_)) {
            Some(String::new())
        } else {
            None
        };

        Some(CourseDraft {
            name: Some(name.to_string()),
            area,
            methodology: Some(methodology.to_string()),
            tier: Some(tier.to_string()),
        })
    }
}

impl Component for CourseForm {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.prev_field();
                None
            }
            KeyCode::Backspace => {
                self.fields[self.focused].pop();
                None
            }
            KeyCode::Enter => match self.build_draft() {
                Some(draft) => match self.mode {
                    FormMode::Create => Some(Action::SubmitCreate(draft)),
                    FormMode::Edit(id) => Some(Action::SubmitUpdate(id, draft)),
                },
                None => None,
            },
            KeyCode::Char(c) => {
                self.fields[self.focused].push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, 14);
        frame.render_widget(Clear, popup_area);

        let title = match self.mode {
            FormMode::Create => " New Course ",
            FormMode::Edit(_) => " Edit Course ",
        };

        let mut lines = vec![Line::from("")];
        for (idx, label) in FIELD_LABELS.iter().enumerate() {
            let focused = idx == self.focused;
            let marker = if focused { "▶ " } else { "  " };
            let value_style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(
                    marker,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:12} ", label),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(self.fields[idx].clone(), value_style),
            ];
            if focused {
                spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled(
                    "  Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Save  "),
                Span::styled(
                    " Tab ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Next field  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title)
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut CourseForm, text: &str) {
        for c in text.chars() {
            form.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_submit_requires_name() {
        let mut form = CourseForm::new();
        form.reset_create();

        let action = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, None);
        assert_eq!(form.error.as_deref(), Some("Name is required"));
    }

    #[test]
    fn test_create_submission_builds_full_draft() {
        let mut form = CourseForm::new();
        form.reset_create();

        type_text(&mut form, "MBA");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut form, "Gestão");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut form, "EAD");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut form, "Alto");

        let action = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::SubmitCreate(draft)) => {
                assert_eq!(draft.name.as_deref(), Some("MBA"));
                assert_eq!(draft.area.as_deref(), Some("Gestão"));
                assert_eq!(draft.methodology.as_deref(), Some("EAD"));
                assert_eq!(draft.tier.as_deref(), Some("Alto"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_empty_area_is_omitted_from_draft() {
        let mut form = CourseForm::new();
        form.reset_create();

        type_text(&mut form, "Curso");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut form, "EAD");
        form.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut form, "Baixo");

        let action = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::SubmitCreate(draft)) => assert_eq!(draft.area, None),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_edit_clearing_area_sends_explicit_empty_value() {
        let course = Course {
            id: 5,
            name: "MBA".to_string(),
            area: Some("Gestão".to_string()),
            methodology: "EAD".to_string(),
            tier: "Alto".to_string(),
            created_at: None,
            active: true,
        };

        let mut form = CourseForm::new();
        form.load_course(&course);
        form.handle_key_event(key(KeyCode::Tab)).unwrap(); // focus Area
        for _ in 0.."Gestão".chars().count() {
            form.handle_key_event(key(KeyCode::Backspace)).unwrap();
        }
        assert!(form.fields[1].is_empty());

        let action = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        match action {
            Some(Action::SubmitUpdate(5, draft)) => {
                assert_eq!(draft.area.as_deref(), Some(""));
                // The update body must carry the key so the area is unassigned
                // rather than silently kept.
                let body = serde_json::to_value(&draft).unwrap();
                assert_eq!(body.get("area"), Some(&serde_json::json!("")));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_edit_mode_prefills_and_targets_course_id() {
        let course = Course {
            id: 42,
            name: "Original".to_string(),
            area: Some("X".to_string()),
            methodology: "EAD".to_string(),
            tier: "Alto".to_string(),
            created_at: None,
            active: true,
        };

        let mut form = CourseForm::new();
        form.load_course(&course);
        assert_eq!(form.fields[0], "Original");

        let action = form.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SubmitUpdate(42, _))));
    }
}
