//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::course::CourseDraft;
use crate::model::modal::FilterDimension;
use std::fmt;
use std::path::PathBuf;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling background responses
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next course in the visible list
    NextItem,
    /// Move to previous course in the visible list
    PrevItem,
    /// Jump to first visible course
    FirstItem,
    /// Jump to last visible course
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search input mode
    EnterSearchMode,
    /// Exit search input mode
    ExitSearchMode,
    /// Add character to search text
    SearchInput(char),
    /// Remove last character from search text
    SearchBackspace,
    /// Cycle the search scope (name, area, methodology, tier)
    CycleSearchScope,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle selection of the highlighted course
    ToggleCourseSelection,
    /// Header checkbox behavior: select all visible, or clear when all
    /// visible are already selected
    ToggleSelectAll,
    /// Clear the selection entirely
    ClearSelection,

    // ─────────────────────────────────────────────────────────────────────────
    // Filters & View
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the multi-select filter dialog for one dimension
    OpenFilter(FilterDimension),
    /// Replace the active value set for one dimension
    SetDimensionFilter(FilterDimension, Vec<String>),
    /// Reset search and all dimension filters
    ClearFilters,
    /// Switch between table and card presentation
    ToggleViewMode,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the create-course form
    OpenAddCourse,
    /// Open the edit form for the highlighted course
    OpenEditCourse,
    /// Open delete confirmation for the highlighted course
    OpenDeleteConfirm,
    /// Open the spreadsheet upload dialog
    OpenUpload,
    /// Open the PDF export dialog for the current selection
    OpenExport,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Navigate up in modal (e.g., previous option)
    ModalUp,
    /// Navigate down in modal (e.g., next option)
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Backend Operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Reload the catalog snapshot and filter options
    RefreshCatalog,
    /// Create a course from a completed form
    SubmitCreate(CourseDraft),
    /// Update a course from a completed form
    SubmitUpdate(i64, CourseDraft),
    /// Delete a course after confirmation
    DeleteCourse(i64),
    /// Upload a spreadsheet for bulk import
    UploadFile(PathBuf),
    /// Export the selected courses as a PDF
    ExportPdf { design: String, title: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::CycleSearchScope => write!(f, "CycleSearchScope"),
            Action::ToggleCourseSelection => write!(f, "ToggleCourseSelection"),
            Action::ToggleSelectAll => write!(f, "ToggleSelectAll"),
            Action::ClearSelection => write!(f, "ClearSelection"),
            Action::OpenFilter(dimension) => write!(f, "OpenFilter({})", dimension.title()),
            Action::SetDimensionFilter(dimension, values) => {
                write!(f, "SetDimensionFilter({}, {:?})", dimension.title(), values)
            }
            Action::ClearFilters => write!(f, "ClearFilters"),
            Action::ToggleViewMode => write!(f, "ToggleViewMode"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenAddCourse => write!(f, "OpenAddCourse"),
            Action::OpenEditCourse => write!(f, "OpenEditCourse"),
            Action::OpenDeleteConfirm => write!(f, "OpenDeleteConfirm"),
            Action::OpenUpload => write!(f, "OpenUpload"),
            Action::OpenExport => write!(f, "OpenExport"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::RefreshCatalog => write!(f, "RefreshCatalog"),
            Action::SubmitCreate(_) => write!(f, "SubmitCreate"),
            Action::SubmitUpdate(id, _) => write!(f, "SubmitUpdate({})", id),
            Action::DeleteCourse(id) => write!(f, "DeleteCourse({})", id),
            Action::UploadFile(path) => write!(f, "UploadFile({})", path.display()),
            Action::ExportPdf { design, .. } => write!(f, "ExportPdf({})", design),
        }
    }
}
