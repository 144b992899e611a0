//! Message dialog component
//!
//! Scrollable multi-line report, used for upload outcomes where the backend
//! returns a per-row error list alongside the success count.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Multi-line message overlay
#[derive(Default)]
pub struct MessageDialog {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll_offset: usize,
}

impl MessageDialog {
    pub fn open(&mut self, title: &str, lines: Vec<String>) {
        self.title = title.to_string();
        self.lines = lines;
        self.scroll_offset = 0;
    }
}

impl Component for MessageDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 6;
        let dialog_area = Rect::new(
            margin,
            margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );

        let visible_height = dialog_area.height.saturating_sub(3) as usize;
        let max_scroll = self.lines.len().saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let mut content: Vec<Line> = self
            .lines
            .iter()
            .map(|line| Line::from(Span::styled(format!("  {}", line), Style::default().fg(Color::White))))
            .collect();
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            "  Press Esc or Enter to close",
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);
        Ok(())
    }
}
