//! Selection & filter state engine
//!
//! `CatalogState` owns the snapshot of the catalog, the active filter
//! criteria, and the selection set, and keeps the derived visible list
//! consistent with all three. Every operation is synchronous and runs to
//! completion; the snapshot is only ever replaced wholesale, never patched.

use super::course::Course;
use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════════════
// Filter Criteria
// ═══════════════════════════════════════════════════════════════════════════════

/// Which field the free-text search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Name,
    Area,
    Methodology,
    Tier,
}

impl SearchScope {
    pub fn label(&self) -> &'static str {
        match self {
            SearchScope::Name => "Name",
            SearchScope::Area => "Area",
            SearchScope::Methodology => "Methodology",
            SearchScope::Tier => "Tier",
        }
    }

    /// Wire value for the `tipo_busca` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            SearchScope::Name => "curso",
            SearchScope::Area => "area",
            SearchScope::Methodology => "metodologia",
            SearchScope::Tier => "faixa",
        }
    }

    pub fn next(&self) -> SearchScope {
        match self {
            SearchScope::Name => SearchScope::Area,
            SearchScope::Area => SearchScope::Methodology,
            SearchScope::Methodology => SearchScope::Tier,
            SearchScope::Tier => SearchScope::Name,
        }
    }
}

/// Free-text search plus three independent multi-select dimension sets.
/// An empty set places no constraint on that dimension.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub scope: SearchScope,
    pub areas: HashSet<String>,
    pub methodologies: HashSet<String>,
    pub tiers: HashSet<String>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.areas.is_empty()
            && self.methodologies.is_empty()
            && self.tiers.is_empty()
    }

    fn matches(&self, course: &Course) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let haystack = match self.scope {
                SearchScope::Name => course.name.as_str(),
                SearchScope::Area => course.area_value(),
                SearchScope::Methodology => course.methodology.as_str(),
                SearchScope::Tier => course.tier.as_str(),
            };
            if !haystack.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if !self.areas.is_empty() && !self.areas.contains(course.area_value()) {
            return false;
        }
        if !self.methodologies.is_empty() && !self.methodologies.contains(&course.methodology) {
            return false;
        }
        if !self.tiers.is_empty() && !self.tiers.contains(&course.tier) {
            return false;
        }

        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Derived reads
// ═══════════════════════════════════════════════════════════════════════════════

/// Tri-state of the select-all header checkbox, derived from the selection
/// set against the currently visible ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl CheckboxState {
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckboxState::Unchecked => "[ ]",
            CheckboxState::Checked => "[x]",
            CheckboxState::Indeterminate => "[-]",
        }
    }
}

/// Counts for the stats header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub total: usize,
    pub visible: usize,
    pub selected: usize,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Catalog State
// ═══════════════════════════════════════════════════════════════════════════════

/// The engine: snapshot + criteria + selection, with the visible list derived
/// deterministically from the first two.
#[derive(Debug, Default)]
pub struct CatalogState {
    snapshot: Vec<Course>,
    criteria: FilterCriteria,
    selection: HashSet<i64>,
    /// Indices into `snapshot`, in snapshot order.
    visible: Vec<usize>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot wholesale. Selection ids that no longer exist are
    /// silently dropped; deletions elsewhere are expected.
    pub fn set_snapshot(&mut self, records: Vec<Course>) {
        self.snapshot = records;
        let existing: HashSet<i64> = self.snapshot.iter().map(|c| c.id).collect();
        self.selection.retain(|id| existing.contains(id));
        self.recompute_visible();
    }

    /// Install new filter criteria and re-derive the visible list. Criteria
    /// are free-form; empty values simply place no constraint.
    pub fn apply_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute_visible();
    }

    /// Flip membership of `id` in the selection set. Ids absent from the
    /// snapshot are accepted; they are pruned on the next snapshot.
    pub fn toggle_selection(&mut self, id: i64) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// Add every visible id to the selection. Ids outside the visible view
    /// keep whatever state they had.
    pub fn select_all_visible(&mut self) {
        for &idx in &self.visible {
            self.selection.insert(self.snapshot[idx].id);
        }
    }

    /// Remove every visible id from the selection. Counterpart of
    /// `select_all_visible` for the header checkbox toggle; hidden ids keep
    /// whatever state they had.
    pub fn deselect_all_visible(&mut self) {
        for &idx in &self.visible {
            self.selection.remove(&self.snapshot[idx].id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_summary(&self) -> SelectionSummary {
        SelectionSummary {
            total: self.snapshot.len(),
            visible: self.visible.len(),
            selected: self.selection.len(),
        }
    }

    /// Tri-state for the header checkbox, recomputed against the visible ids.
    pub fn select_all_checkbox_state(&self) -> CheckboxState {
        if self.visible.is_empty() {
            return CheckboxState::Unchecked;
        }

        let selected_visible = self
            .visible
            .iter()
            .filter(|&&idx| self.selection.contains(&self.snapshot[idx].id))
            .count();

        if selected_visible == 0 {
            CheckboxState::Unchecked
        } else if selected_visible == self.visible.len() {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selection.contains(&id)
    }

    /// Visible courses in snapshot order.
    pub fn visible_courses(&self) -> impl Iterator<Item = &Course> {
        self.visible.iter().map(|&idx| &self.snapshot[idx])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// The visible course at a cursor position.
    pub fn visible_course(&self, position: usize) -> Option<&Course> {
        self.visible.get(position).map(|&idx| &self.snapshot[idx])
    }

    pub fn course_by_id(&self, id: i64) -> Option<&Course> {
        self.snapshot.iter().find(|c| c.id == id)
    }

    /// Selected ids in ascending order, for export payloads.
    pub fn selected_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.selection.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn recompute_visible(&mut self) {
        self.visible = self
            .snapshot
            .iter()
            .enumerate()
            .filter(|(_, course)| self.criteria.matches(course))
            .map(|(idx, _)| idx)
            .collect();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: i64, name: &str, area: Option<&str>, methodology: &str, tier: &str) -> Course {
        Course {
            id,
            name: name.to_string(),
            area: area.map(|a| a.to_string()),
            methodology: methodology.to_string(),
            tier: tier.to_string(),
            created_at: None,
            active: true,
        }
    }

    fn sample() -> Vec<Course> {
        vec![
            course(1, "A", Some("X"), "EAD", "Baixo"),
            course(2, "B", Some("Y"), "Presencial", "Alto"),
            course(3, "AB", None, "EAD", "Alto"),
        ]
    }

    fn visible_ids(state: &CatalogState) -> Vec<i64> {
        state.visible_courses().map(|c| c.id).collect()
    }

    #[test]
    fn test_unconstrained_filter_yields_full_snapshot_in_order() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.apply_filter(FilterCriteria::default());
        assert_eq!(visible_ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn test_text_search_is_case_insensitive_substring_on_scoped_field() {
        let mut state = CatalogState::new();
        state.set_snapshot(vec![
            course(1, "A", Some("X"), "EAD", "Baixo"),
            course(2, "B", Some("Y"), "Presencial", "Alto"),
        ]);

        state.apply_filter(FilterCriteria {
            search: "a".to_string(),
            scope: SearchScope::Name,
            ..Default::default()
        });
        assert_eq!(visible_ids(&state), vec![1]);

        // Same term scoped to tier matches both ("Baixo", "Alto").
        state.apply_filter(FilterCriteria {
            search: "a".to_string(),
            scope: SearchScope::Tier,
            ..Default::default()
        });
        assert_eq!(visible_ids(&state), vec![1, 2]);
    }

    #[test]
    fn test_dimension_sets_and_combine_with_search() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());

        let mut criteria = FilterCriteria {
            search: "a".to_string(),
            scope: SearchScope::Name,
            ..Default::default()
        };
        criteria.methodologies.insert("EAD".to_string());
        criteria.tiers.insert("Alto".to_string());
        state.apply_filter(criteria);

        // "A" fails the tier set, "B" fails the search, "AB" passes both.
        assert_eq!(visible_ids(&state), vec![3]);
    }

    #[test]
    fn test_empty_dimension_set_means_no_constraint() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());

        let mut criteria = FilterCriteria::default();
        criteria.areas.insert("X".to_string());
        state.apply_filter(criteria);
        assert_eq!(visible_ids(&state), vec![1]);

        // Clearing the set restores everything, not nothing.
        state.apply_filter(FilterCriteria::default());
        assert_eq!(visible_ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn test_unassigned_area_never_matches_a_nonempty_area_set() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());

        let mut criteria = FilterCriteria::default();
        criteria.areas.insert("X".to_string());
        criteria.areas.insert("Y".to_string());
        state.apply_filter(criteria);
        assert_eq!(visible_ids(&state), vec![1, 2]);
    }

    #[test]
    fn test_filter_preserves_snapshot_order() {
        let mut state = CatalogState::new();
        state.set_snapshot(vec![
            course(9, "Zeta", None, "EAD", "Alto"),
            course(4, "Alfa", None, "EAD", "Alto"),
            course(7, "Beta", None, "EAD", "Alto"),
        ]);

        let mut criteria = FilterCriteria::default();
        criteria.methodologies.insert("EAD".to_string());
        state.apply_filter(criteria);
        assert_eq!(visible_ids(&state), vec![9, 4, 7]);
    }

    #[test]
    fn test_snapshot_replacement_prunes_missing_selection_ids() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.toggle_selection(1);
        state.toggle_selection(2);
        assert_eq!(state.selection_summary().selected, 2);

        // Record 2 was deleted elsewhere; its id is dropped silently.
        state.set_snapshot(vec![course(1, "A", Some("X"), "EAD", "Baixo")]);
        assert_eq!(state.selected_ids(), vec![1]);
    }

    #[test]
    fn test_toggle_of_unknown_id_is_permitted_and_pruned_later() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.toggle_selection(999);
        assert!(state.is_selected(999));

        state.set_snapshot(sample());
        assert!(!state.is_selected(999));
    }

    #[test]
    fn test_selection_persists_across_filter_changes() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.toggle_selection(2);

        let mut criteria = FilterCriteria::default();
        criteria.methodologies.insert("EAD".to_string());
        state.apply_filter(criteria);

        // Record 2 is filtered out of view but stays selected.
        assert_eq!(visible_ids(&state), vec![1, 3]);
        assert!(state.is_selected(2));
    }

    #[test]
    fn test_checkbox_state_transitions() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        assert_eq!(state.select_all_checkbox_state(), CheckboxState::Unchecked);

        state.toggle_selection(1);
        state.toggle_selection(3);
        assert_eq!(
            state.select_all_checkbox_state(),
            CheckboxState::Indeterminate
        );

        state.select_all_visible();
        assert_eq!(state.selected_ids(), vec![1, 2, 3]);
        assert_eq!(state.select_all_checkbox_state(), CheckboxState::Checked);
    }

    #[test]
    fn test_checkbox_unchecked_on_empty_view() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.select_all_visible();

        state.apply_filter(FilterCriteria {
            search: "no such course".to_string(),
            ..Default::default()
        });
        assert_eq!(state.visible_count(), 0);
        assert_eq!(state.select_all_checkbox_state(), CheckboxState::Unchecked);
    }

    #[test]
    fn test_select_all_only_touches_visible_ids() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());

        let mut criteria = FilterCriteria::default();
        criteria.tiers.insert("Alto".to_string());
        state.apply_filter(criteria);
        state.select_all_visible();

        assert_eq!(state.selected_ids(), vec![2, 3]);
    }

    #[test]
    fn test_deselect_all_only_touches_visible_ids() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.select_all_visible();

        let mut criteria = FilterCriteria::default();
        criteria.tiers.insert("Alto".to_string());
        state.apply_filter(criteria);
        state.deselect_all_visible();

        // Only record 1 was hidden from the view; it stays selected.
        assert_eq!(state.selected_ids(), vec![1]);
    }

    #[test]
    fn test_clear_selection_is_idempotent() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.select_all_visible();

        state.clear_selection();
        assert_eq!(state.selection_summary().selected, 0);
        state.clear_selection();
        assert_eq!(state.selection_summary().selected, 0);
    }

    #[test]
    fn test_selection_summary_counts() {
        let mut state = CatalogState::new();
        state.set_snapshot(sample());
        state.toggle_selection(1);

        let mut criteria = FilterCriteria::default();
        criteria.methodologies.insert("EAD".to_string());
        state.apply_filter(criteria);

        let summary = state.selection_summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.visible, 2);
        assert_eq!(summary.selected, 1);
    }
}
