//! Dimension filter dialog component
//!
//! Multi-select value picker for one catalog dimension (area, methodology,
//! or price tier). Space toggles values locally; Enter applies the chosen
//! set, and an empty set means no constraint.

use crate::action::Action;
use crate::component::Component;
use crate::model::modal::FilterDimension;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// Multi-select filter dialog for one dimension
pub struct FilterDialog {
    /// Dimension this dialog edits
    pub dimension: FilterDimension,
    /// Values offered for selection
    pub values: Vec<String>,
    /// Values currently checked (pending until Enter)
    pub checked: HashSet<String>,
    /// Highlighted row
    pub selected_index: usize,
    /// List state for rendering
    pub list_state: ListState,
}

impl Default for FilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            dimension: FilterDimension::Area,
            values: Vec::new(),
            checked: HashSet::new(),
            selected_index: 0,
            list_state,
        }
    }

    /// Load the dialog with the dimension's values and its active filter set
    pub fn open(&mut self, dimension: FilterDimension, values: Vec<String>, active: &HashSet<String>) {
        self.dimension = dimension;
        self.values = values;
        self.checked = active.clone();
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    fn toggle_highlighted(&mut self) {
        if let Some(value) = self.values.get(self.selected_index) {
            if !self.checked.remove(value) {
                self.checked.insert(value.clone());
            }
        }
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.values.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// Checked values in a stable order for the apply action
    fn checked_values(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|v| self.checked.contains(*v))
            .cloned()
            .collect()
    }
}

impl Component for FilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetDimensionFilter(
                self.dimension,
                self.checked_values(),
            )),
            KeyCode::Char('c') => {
                self.checked.clear();
                Some(Action::SetDimensionFilter(self.dimension, Vec::new()))
            }
            KeyCode::Char(' ') => {
                self.toggle_highlighted();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let popup_width = 46u16.min(area.width.saturating_sub(4));
        let content_height = if self.values.is_empty() {
            6
        } else {
            self.values.len() as u16 + 2
        };
        let popup_height = (content_height + 6).min(area.height.saturating_sub(4)).max(12);

        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Value list / empty message
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        // Header
        let header_text = if self.checked.is_empty() {
            "No constraint (all values pass)".to_string()
        } else {
            format!("{} value(s) checked", self.checked.len())
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Filter: {} ", self.dimension.title()))
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, main_chunks[0]);

        if self.values.is_empty() {
            let empty_message = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No values available for this dimension",
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Refresh the catalog or add courses first.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty_message, main_chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .values
                .iter()
                .map(|value| {
                    let is_checked = self.checked.contains(value);
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            if is_checked { "[x] " } else { "[ ] " },
                            Style::default().fg(if is_checked {
                                Color::Green
                            } else {
                                Color::DarkGray
                            }),
                        ),
                        Span::styled(
                            value.clone(),
                            if is_checked {
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::White)
                            },
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, main_chunks[1], &mut self.list_state);
        }

        // Help bar
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", Style::default().fg(Color::Green)),
            Span::raw("Toggle  "),
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" c ", Style::default().fg(Color::Cyan)),
            Span::raw("Clear  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, main_chunks[2]);

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

    fn dialog_with(values: &[&str], active: &[&str]) -> FilterDialog {
        let mut dialog = FilterDialog::new();
        let active: HashSet<String> = active.iter().map(|v| v.to_string()).collect();
        dialog.open(
            FilterDimension::Tier,
            values.iter().map(|v| v.to_string()).collect(),
            &active,
        );
        dialog
    }

    #[test]
    fn test_space_toggles_highlighted_value() {
        let mut dialog = dialog_with(&["Baixo", "Alto"], &[]);

        dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert!(dialog.checked.contains("Baixo"));

        dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        assert!(dialog.checked.is_empty());
    }

    #[test]
    fn test_enter_applies_checked_values_in_list_order() {
        let mut dialog = dialog_with(&["Baixo", "Médio", "Alto"], &["Alto"]);

        dialog.handle_key_event(key(KeyCode::Char(' '))).unwrap(); // check Baixo

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::SetDimensionFilter(
                FilterDimension::Tier,
                vec!["Baixo".to_string(), "Alto".to_string()],
            ))
        );
    }

    #[test]
    fn test_clear_emits_empty_set() {
        let mut dialog = dialog_with(&["Baixo", "Alto"], &["Baixo", "Alto"]);

        let action = dialog.handle_key_event(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(
            action,
            Some(Action::SetDimensionFilter(FilterDimension::Tier, Vec::new()))
        );
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut dialog = dialog_with(&["A", "B"], &[]);

        dialog.handle_key_event(key(KeyCode::Down)).unwrap();
        dialog.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(dialog.selected_index, 1);

        dialog.handle_key_event(key(KeyCode::Up)).unwrap();
        dialog.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(dialog.selected_index, 0);
    }
}
