//! Home component - Main application screen
//!
//! Displays the stats header, search/filter bar, and the catalog body in
//! either table or card layout. Owns cursor and presentation state; the
//! catalog data itself arrives pre-derived as a `RenderSurface`.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_main_layout;
use crate::model::catalog::FilterCriteria;
use crate::model::modal::FilterDimension;
use crate::model::render::{CourseView, RenderSurface};
use crate::model::ui::ViewMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main application view
/// Owns cursor position and presentation toggles
pub struct HomeComponent {
    /// Cursor position in the visible list
    pub cursor: usize,

    /// Table selection state for rendering
    pub table_state: TableState,

    /// Whether search input mode is active
    pub search_mode: bool,

    /// Table or card presentation
    pub view_mode: ViewMode,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            table_state: TableState::default(),
            search_mode: false,
            view_mode: ViewMode::Table,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Move cursor to the next visible course, wrapping to the first
    pub fn next(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % visible_len;
    }

    /// Move cursor to the previous visible course, wrapping to the last
    pub fn previous(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if self.cursor == 0 {
            visible_len - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self, visible_len: usize) {
        self.cursor = visible_len.saturating_sub(1);
    }

    /// Keep the cursor inside the visible list after a refresh or filter
    /// change shrinks it
    pub fn clamp_cursor(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible_len {
            self.cursor = visible_len - 1;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('s') => Some(Action::CycleSearchScope),

            // Selection
            KeyCode::Char(' ') => Some(Action::ToggleCourseSelection),
            KeyCode::Char('a') => Some(Action::ToggleSelectAll),
            KeyCode::Esc => Some(Action::ClearSelection),

            // Filters & view
            KeyCode::Char('f') => Some(Action::OpenFilter(FilterDimension::Area)),
            KeyCode::Char('m') => Some(Action::OpenFilter(FilterDimension::Methodology)),
            KeyCode::Char('t') => Some(Action::OpenFilter(FilterDimension::Tier)),
            KeyCode::Char('c') => Some(Action::ClearFilters),
            KeyCode::Char('v') => Some(Action::ToggleViewMode),

            // Course operations
            KeyCode::Char('n') => Some(Action::OpenAddCourse),
            KeyCode::Char('e') => Some(Action::OpenEditCourse),
            KeyCode::Char('d') => Some(Action::OpenDeleteConfirm),
            KeyCode::Char('u') => Some(Action::OpenUpload),
            KeyCode::Char('x') => Some(Action::OpenExport),
            KeyCode::Char('r') => Some(Action::RefreshCatalog),

            // Modals
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        // Updates are handled by App which owns the catalog state
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub surface: &'a RenderSurface,
    pub criteria: &'a FilterCriteria,
    pub api_url: &'a str,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub loading: bool,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_stats_header(frame, layout.stats, ctx);
    render_filter_bar(frame, layout.filter_bar, home, ctx);

    // The surface carries the mode it was built for; draw that, not the
    // component's copy, so the frame always matches its data.
    match ctx.surface.mode {
        ViewMode::Table => render_table(frame, layout.body, home, ctx),
        ViewMode::Cards => render_cards(frame, layout.body, home, ctx),
    }

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, home, ctx);

    Ok(())
}

/// Truncate a string to a display width, appending an ellipsis when cut.
/// Width-aware so wide characters do not break column alignment.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn render_stats_header(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let summary = ctx.surface.summary;

    let mut spans = vec![
        Span::styled(
            ctx.surface.header_checkbox.symbol(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Total: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            summary.total.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Showing: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            summary.visible.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Selected: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            summary.selected.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  View: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            ctx.surface.mode.name(),
            Style::default().fg(Color::Magenta),
        ),
    ];

    if ctx.loading {
        spans.push(Span::styled(
            "  (loading…)",
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Course Catalog ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_filter_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let criteria = ctx.criteria;
    let mut spans = vec![
        Span::styled(
            format!("Search [{}]: ", criteria.scope.label()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            criteria.search.clone(),
            Style::default().fg(Color::White),
        ),
    ];

    if home.search_mode {
        spans.push(Span::styled(
            "█",
            Style::default().fg(Color::Cyan),
        ));
    } else if criteria.search.is_empty() {
        spans.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    }

    // Active dimension filters on the same line
    for (label, count) in [
        ("area", criteria.areas.len()),
        ("methodology", criteria.methodologies.len()),
        ("tier", criteria.tiers.len()),
    ] {
        if count > 0 {
            spans.push(Span::styled(
                format!("  [{}:{}]", label, count),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    let border_color = if home.search_mode {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, area: Rect, home: &mut HomeComponent, ctx: &HomeRenderContext) {
    let surface = ctx.surface;

    let header = Row::new(vec![
        Cell::from(surface.header_checkbox.symbol()),
        Cell::from("ID"),
        Cell::from("Name"),
        Cell::from("Area"),
        Cell::from("Methodology"),
        Cell::from("Tier"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = surface
        .items
        .iter()
        .map(|item| course_row(item))
        .collect();

    let title = table_title(surface);

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(24),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▶ ");

    home.clamp_cursor(surface.items.len());
    let selected = if surface.items.is_empty() {
        None
    } else {
        Some(home.cursor)
    };
    home.table_state.select(selected);

    frame.render_stateful_widget(table, area, &mut home.table_state);

    if surface.items.is_empty() {
        render_empty_message(frame, area, ctx);
    }
}

fn course_row(item: &CourseView) -> Row<'static> {
    let checkbox = if item.selected { "[x]" } else { "[ ]" };
    let checkbox_style = if item.selected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let area_style = if item.area_assigned {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Row::new(vec![
        Cell::from(Span::styled(checkbox, checkbox_style)),
        Cell::from(Span::styled(
            item.id.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Cell::from(truncate_to_width(&item.name, 40)),
        Cell::from(Span::styled(truncate_to_width(&item.area, 18), area_style)),
        Cell::from(truncate_to_width(&item.methodology, 12)),
        Cell::from(truncate_to_width(&item.tier, 8)),
    ])
}

fn table_title(surface: &RenderSurface) -> String {
    let summary = surface.summary;
    if summary.selected > 0 {
        format!(" Courses ({}) [{}✓] ", summary.visible, summary.selected)
    } else {
        format!(" Courses ({}) ", summary.visible)
    }
}

const CARD_WIDTH: u16 = 34;
const CARD_HEIGHT: u16 = 6;

fn render_cards(frame: &mut Frame, area: Rect, home: &mut HomeComponent, ctx: &HomeRenderContext) {
    let surface = ctx.surface;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(table_title(surface))
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if surface.items.is_empty() {
        render_empty_message(frame, area, ctx);
        return;
    }

    home.clamp_cursor(surface.items.len());

    let columns = (inner.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (inner.height / CARD_HEIGHT).max(1) as usize;

    // Scroll the grid so the cursor's row stays on screen
    let cursor_row = home.cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows.saturating_sub(1));

    for (idx, item) in surface.items.iter().enumerate() {
        let row = idx / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = idx % columns;

        let card_area = Rect::new(
            inner.x + (col as u16) * CARD_WIDTH,
            inner.y + ((row - first_row) as u16) * CARD_HEIGHT,
            CARD_WIDTH.min(inner.width.saturating_sub((col as u16) * CARD_WIDTH)),
            CARD_HEIGHT.min(inner.height.saturating_sub(((row - first_row) as u16) * CARD_HEIGHT)),
        );
        if card_area.width < 10 || card_area.height < 4 {
            continue;
        }

        render_card(frame, card_area, item, idx == home.cursor);
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &CourseView, focused: bool) {
    let border_color = if focused {
        Color::Blue
    } else if item.selected {
        Color::Green
    } else {
        Color::DarkGray
    };

    let checkbox = if item.selected { "[x] " } else { "[ ] " };
    let width = area.width.saturating_sub(6) as usize;

    let lines = vec![
        Line::from(vec![
            Span::styled(
                checkbox,
                Style::default()
                    .fg(if item.selected { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(
                truncate_to_width(&item.name, width.saturating_sub(4)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("area: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                truncate_to_width(&item.area, width.saturating_sub(6)),
                if item.area_assigned {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                },
            ),
        ]),
        Line::from(vec![
            Span::styled("method: ", Style::default().fg(Color::DarkGray)),
            Span::raw(truncate_to_width(&item.methodology, width.saturating_sub(8))),
        ]),
        Line::from(vec![
            Span::styled("tier: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                truncate_to_width(&item.tier, width.saturating_sub(6)),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" #{} ", item.id))
            .title_style(Style::default().fg(Color::DarkGray))
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(card, area);
}

fn render_empty_message(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let message = if ctx.criteria.is_unconstrained() {
        "No courses loaded. Press r to refresh."
    } else {
        "No courses match the current filters. Press c to clear them."
    };

    let inner = Rect::new(
        area.x + 2,
        area.y + area.height / 2,
        area.width.saturating_sub(4),
        1,
    );
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(Color::Yellow),
    )))
    .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let spans = if let Some(error) = ctx.error {
        vec![Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        )]
    } else if let Some(status) = ctx.status_message {
        vec![Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        )]
    } else {
        vec![Span::styled(
            format!(" {} ", ctx.api_url),
            Style::default().fg(Color::DarkGray),
        )]
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let help_spans = if home.search_mode {
        vec![
            Span::styled(
                " Esc/Enter ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Done  "),
            Span::styled(
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Scope  "),
            Span::styled(
                format!("Search: {}", ctx.criteria.search),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else if ctx.surface.summary.selected > 0 {
        vec![
            Span::styled(
                " Space ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Toggle  "),
            Span::styled(
                " a ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("All  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Clear  "),
            Span::styled(
                " x ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Export PDF  "),
            Span::styled(
                format!("{} selected", ctx.surface.summary.selected),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            Span::styled(
                " q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit "),
            Span::styled(
                " n ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("New "),
            Span::styled(
                " e ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Edit "),
            Span::styled(
                " d ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Delete "),
            Span::styled(
                " / ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Search "),
            Span::styled(
                " f/m/t ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Filter "),
            Span::styled(
                " v ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("View "),
            Span::styled(
                " u ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Upload "),
            Span::styled(
                " ? ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Help"),
        ]
    };

    let paragraph =
        Paragraph::new(Line::from(help_spans)).alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_navigation_wraps() {
        let mut home = HomeComponent::new();
        home.next(3);
        home.next(3);
        assert_eq!(home.cursor, 2);
        home.next(3);
        assert_eq!(home.cursor, 0);

        home.previous(3);
        assert_eq!(home.cursor, 2);
    }

    #[test]
    fn test_cursor_clamped_when_view_shrinks() {
        let mut home = HomeComponent::new();
        home.last(10);
        assert_eq!(home.cursor, 9);

        home.clamp_cursor(4);
        assert_eq!(home.cursor, 3);

        home.clamp_cursor(0);
        assert_eq!(home.cursor, 0);
    }

    #[test]
    fn test_navigation_on_empty_list_is_inert() {
        let mut home = HomeComponent::new();
        home.next(0);
        home.previous(0);
        assert_eq!(home.cursor, 0);
    }

    #[test]
    fn test_draw_follows_the_surface_view_mode() {
        use crate::model::catalog::{CheckboxState, SelectionSummary};
        use ratatui::{backend::TestBackend, Terminal};

        let surface = RenderSurface {
            mode: ViewMode::Cards,
            items: Vec::new(),
            header_checkbox: CheckboxState::Unchecked,
            summary: SelectionSummary {
                total: 0,
                visible: 0,
                selected: 0,
            },
        };
        let criteria = FilterCriteria::default();
        let ctx = HomeRenderContext {
            surface: &surface,
            criteria: &criteria,
            api_url: "http://localhost:5000/api",
            error: None,
            status_message: None,
            loading: false,
        };

        // Component copy deliberately out of step with the surface.
        let mut home = HomeComponent::new();
        assert_eq!(home.view_mode, ViewMode::Table);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_home_screen(frame, frame.area(), &mut home, &ctx).unwrap();
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("View: Cards"));
    }

    #[test]
    fn test_truncate_to_width_preserves_short_text() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_to_width_appends_ellipsis() {
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
    }
}
