//! Modal stack for managing overlays
//!
//! Replaces per-dialog boolean flags with an enum-based modal stack; only
//! the top modal receives input.

/// Catalog dimension targeted by a multi-select filter dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Area,
    Methodology,
    Tier,
}

impl FilterDimension {
    pub fn title(&self) -> &'static str {
        match self {
            FilterDimension::Area => "Area",
            FilterDimension::Methodology => "Methodology",
            FilterDimension::Tier => "Price Tier",
        }
    }
}

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Create-course form
    AddCourse,
    /// Edit form for an existing course
    EditCourse { id: i64 },
    /// Delete confirmation for a single course
    ConfirmDelete { id: i64, name: String },
    /// Multi-select filter for one dimension
    Filter { dimension: FilterDimension },
    /// Spreadsheet upload (file path input)
    Upload,
    /// PDF export options for the selected courses
    Export,
    /// Multi-line result report (e.g. upload outcome); content lives in the
    /// message dialog component
    Message,
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    /// Create a new empty modal stack
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal onto the stack
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Pop the top modal from the stack
    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        assert!(stack.top().is_some());

        stack.push(Modal::AddCourse);

        let top = stack.pop();
        assert_eq!(top, Some(Modal::AddCourse));

        let top = stack.pop();
        assert_eq!(top, Some(Modal::QuitConfirm));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_top() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        assert_eq!(stack.top(), Some(&Modal::QuitConfirm));

        stack.push(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));
    }
}
