//! Render surface description
//!
//! A pure projection from (visible view, selection, view mode) to the data a
//! UI layer needs to draw. Keeps the state engine fully decoupled from the
//! terminal: components render a `RenderSurface`, never `CatalogState`.

use super::catalog::{CatalogState, CheckboxState, SelectionSummary};
use super::ui::ViewMode;

/// One visible record, ready for a table row or a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseView {
    pub id: i64,
    pub name: String,
    pub area: String,
    pub area_assigned: bool,
    pub methodology: String,
    pub tier: String,
    pub selected: bool,
}

/// Everything a render target needs for one frame of the catalog body.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    pub mode: ViewMode,
    pub items: Vec<CourseView>,
    pub header_checkbox: CheckboxState,
    pub summary: SelectionSummary,
}

/// Build the render surface for the current state. Deterministic: the same
/// state and mode always produce the same description.
pub fn build_render_surface(state: &CatalogState, mode: ViewMode) -> RenderSurface {
    let items = state
        .visible_courses()
        .map(|course| CourseView {
            id: course.id,
            name: course.name.clone(),
            area: course.area_label().to_string(),
            area_assigned: course.area.as_deref().is_some_and(|a| !a.is_empty()),
            methodology: course.methodology.clone(),
            tier: course.tier.clone(),
            selected: state.is_selected(course.id),
        })
        .collect();

    RenderSurface {
        mode,
        items,
        header_checkbox: state.select_all_checkbox_state(),
        summary: state.selection_summary(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::FilterCriteria;
    use crate::model::course::Course;

    fn course(id: i64, name: &str, area: Option<&str>) -> Course {
        Course {
            id,
            name: name.to_string(),
            area: area.map(|a| a.to_string()),
            methodology: "EAD".to_string(),
            tier: "Baixo".to_string(),
            created_at: None,
            active: true,
        }
    }

    #[test]
    fn test_surface_reflects_visible_order_and_selection() {
        let mut state = CatalogState::new();
        state.set_snapshot(vec![course(1, "A", Some("X")), course(2, "B", None)]);
        state.toggle_selection(2);

        let surface = build_render_surface(&state, ViewMode::Table);
        assert_eq!(surface.items.len(), 2);
        assert_eq!(surface.items[0].id, 1);
        assert!(!surface.items[0].selected);
        assert!(surface.items[1].selected);
        assert_eq!(surface.header_checkbox, CheckboxState::Indeterminate);
    }

    #[test]
    fn test_unassigned_area_gets_placeholder_label() {
        let mut state = CatalogState::new();
        state.set_snapshot(vec![course(1, "A", None)]);

        let surface = build_render_surface(&state, ViewMode::Cards);
        assert_eq!(surface.items[0].area, "unassigned");
        assert!(!surface.items[0].area_assigned);
    }

    #[test]
    fn test_view_mode_does_not_change_content() {
        let mut state = CatalogState::new();
        state.set_snapshot(vec![course(1, "A", Some("X")), course(2, "B", Some("Y"))]);
        state.apply_filter(FilterCriteria {
            search: "a".to_string(),
            ..Default::default()
        });
        state.toggle_selection(1);

        let table = build_render_surface(&state, ViewMode::Table);
        let cards = build_render_surface(&state, ViewMode::Cards);
        assert_eq!(table.items, cards.items);
        assert_eq!(table.summary, cards.summary);
    }
}
