//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `CatalogState` - the selection & filter state engine
//! - `Course` and the API wire types
//! - `RenderSurface` - derived view description consumed by the UI
//! - `ModalStack` - modal overlay management

pub mod catalog;
pub mod course;
pub mod modal;
pub mod render;
pub mod ui;

// Re-export commonly used types
pub use catalog::{CatalogState, CheckboxState, FilterCriteria, SearchScope, SelectionSummary};
pub use course::{Course, CourseDraft, FilterOptions, UploadReport};
pub use modal::{FilterDimension, Modal, ModalStack};
pub use render::{build_render_surface, CourseView, RenderSurface};
pub use ui::ViewMode;
