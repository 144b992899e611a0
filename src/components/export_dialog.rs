//! PDF export dialog component
//!
//! Lets the user pick a report design and title before exporting the
//! selected courses. The design names match what the backend's report
//! generator accepts.

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

const DESIGNS: [(&str, &str); 2] = [
    ("design1", "Classic list layout"),
    ("design2", "Compact grid layout"),
];

/// Export options dialog
pub struct ExportDialog {
    /// Index into DESIGNS
    pub design_index: usize,
    /// Report title input
    pub title: String,
    /// Whether the title input has focus (otherwise the design picker does)
    pub editing_title: bool,
    /// Number of selected courses, shown for confirmation
    pub selection_count: usize,
}

impl Default for ExportDialog {
    fn default() -> Self {
        Self {
            design_index: 0,
            title: String::new(),
            editing_title: false,
            selection_count: 0,
        }
    }
}

impl ExportDialog {
    /// Prime the dialog from config defaults and the current selection
    pub fn open(&mut self, default_design: &str, default_title: &str, selection_count: usize) {
        self.design_index = DESIGNS
            .iter()
            .position(|(name, _)| *name == default_design)
            .unwrap_or(0);
        self.title = default_title.to_string();
        self.editing_title = false;
        self.selection_count = selection_count;
    }

    fn design(&self) -> &'static str {
        DESIGNS[self.design_index].0
    }
}

impl Component for ExportDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing_title {
            let action = match key.code {
                KeyCode::Esc | KeyCode::Tab => {
                    self.editing_title = false;
                    None
                }
                KeyCode::Enter => Some(Action::ExportPdf {
                    design: self.design().to_string(),
                    title: self.title.clone(),
                }),
                KeyCode::Backspace => {
                    self.title.pop();
                    None
                }
                KeyCode::Char(c) => {
                    self.title.push(c);
                    None
                }
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ExportPdf {
                design: self.design().to_string(),
                title: self.title.clone(),
            }),
            KeyCode::Tab => {
                self.editing_title = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.design_index > 0 {
                    self.design_index -= 1;
                }
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.design_index + 1 < DESIGNS.len() {
                    self.design_index += 1;
                }
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 54, 13);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  Exporting {} selected course(s)", self.selection_count),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
        ];

        for (idx, (name, description)) in DESIGNS.iter().enumerate() {
            let focused = !self.editing_title && idx == self.design_index;
            let chosen = idx == self.design_index;
            lines.push(Line::from(vec![
                Span::styled(
                    if focused { "  ▶ " } else { "    " },
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    if chosen { "(•) " } else { "( ) " },
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("{:10}", name),
                    if chosen {
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    },
                ),
                Span::styled(*description, Style::default().fg(Color::DarkGray)),
            ]));
        }

        lines.push(Line::from(""));
        let mut title_spans = vec![
            Span::styled(
                if self.editing_title { "  ▶ " } else { "    " },
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("Title: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ];
        if self.editing_title {
            title_spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        lines.push(Line::from(title_spans));

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "  Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Export  "),
            Span::styled(
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Title/design  "),
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
                .border_style(Style::default().fg(Color::Magenta))
                .title(" Export PDF ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
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
    fn test_open_selects_configured_design() {
        let mut dialog = ExportDialog::default();
        dialog.open("design2", "Relatório", 3);
        assert_eq!(dialog.design_index, 1);
        assert_eq!(dialog.title, "Relatório");
        assert_eq!(dialog.selection_count, 3);
    }

    #[test]
    fn test_unknown_design_falls_back_to_first() {
        let mut dialog = ExportDialog::default();
        dialog.open("design9", "T", 1);
        assert_eq!(dialog.design_index, 0);
    }

    #[test]
    fn test_enter_emits_export_with_chosen_options() {
        let mut dialog = ExportDialog::default();
        dialog.open("design1", "Catalog", 2);
        dialog.handle_key_event(key(KeyCode::Down)).unwrap();

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::ExportPdf {
                design: "design2".to_string(),
                title: "Catalog".to_string(),
            })
        );
    }

    #[test]
    fn test_tab_switches_to_title_editing() {
        let mut dialog = ExportDialog::default();
        dialog.open("design1", "", 1);

        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert!(dialog.editing_title);

        dialog.handle_key_event(key(KeyCode::Char('Q'))).unwrap();
        assert_eq!(dialog.title, "Q");
    }
}
