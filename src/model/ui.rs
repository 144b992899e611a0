//! UI state - presentation enums separate from domain data

/// Table or card-grid presentation of the visible catalog. A pure display
/// switch: it never affects filtering or selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Cards => "Cards",
        }
    }

    pub fn toggled(&self) -> ViewMode {
        match self {
            ViewMode::Table => ViewMode::Cards,
            ViewMode::Cards => ViewMode::Table,
        }
    }
}
