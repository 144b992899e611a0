//! Delete confirmation dialog component
//!
//! Deletion is permanent on the backend, so it always asks first.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Delete confirmation for a single course
#[derive(Default)]
pub struct DeleteDialog {
    pub course_id: i64,
    pub course_name: String,
}

impl DeleteDialog {
    pub fn open(&mut self, id: i64, name: &str) {
        self.course_id = id;
        self.course_name = name.to_string();
    }
}

impl Component for DeleteDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::DeleteCourse(self.course_id)),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 50, 8);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Delete \"{}\"?", self.course_name),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "This cannot be undone.",
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Delete  "),
                Span::styled(
                    " n/Esc ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Keep"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Delete Course ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center);

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

    #[test]
    fn test_confirm_deletes_the_loaded_course() {
        let mut dialog = DeleteDialog::default();
        dialog.open(7, "MBA");

        let action = dialog.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        assert_eq!(action, Some(Action::DeleteCourse(7)));
    }

    #[test]
    fn test_decline_closes_without_deleting() {
        let mut dialog = DeleteDialog::default();
        dialog.open(7, "MBA");

        let action = dialog.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }
}
