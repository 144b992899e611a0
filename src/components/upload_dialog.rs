//! Spreadsheet upload dialog component
//!
//! Prompts for a local spreadsheet path. Only .xlsx/.xls files are accepted;
//! the backend parses the sheet and reports per-row results.

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
use std::path::{Path, PathBuf};

/// Upload dialog with a single path input
#[derive(Default)]
pub struct UploadDialog {
    pub input: String,
    pub error: Option<String>,
}

fn has_spreadsheet_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls")
    )
}

impl UploadDialog {
    pub fn reset(&mut self) {
        self.input.clear();
        self.error = None;
    }

    fn validate(&mut self) -> Option<PathBuf> {
        self.error = None;

        if self.input.trim().is_empty() {
            self.error = Some("File path is required".to_string());
            return None;
        }

        let path = PathBuf::from(self.input.trim());
        if !has_spreadsheet_extension(&path) {
            self.error = Some("Only .xlsx and .xls files are supported".to_string());
            return None;
        }
        if !path.exists() {
            self.error = Some(format!("File not found: {}", path.display()));
            return None;
        }

        Some(path)
    }
}

impl Component for UploadDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.validate().map(Action::UploadFile),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 9);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Path: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.input.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
        ];

        if let Some(ref error) = self.error {
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  Accepted formats: .xlsx, .xls",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "  Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Upload  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Upload Spreadsheet ")
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

    #[test]
    fn test_rejects_empty_path() {
        let mut dialog = UploadDialog::default();
        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, None);
        assert!(dialog.error.is_some());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let mut dialog = UploadDialog::default();
        dialog.input = "/tmp/courses.csv".to_string();

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, None);
        assert_eq!(
            dialog.error.as_deref(),
            Some("Only .xlsx and .xls files are supported")
        );
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(has_spreadsheet_extension(Path::new("/tmp/a.XLSX")));
        assert!(has_spreadsheet_extension(Path::new("/tmp/a.xls")));
        assert!(!has_spreadsheet_extension(Path::new("/tmp/a.pdf")));
        assert!(!has_spreadsheet_extension(Path::new("/tmp/xlsx")));
    }
}
