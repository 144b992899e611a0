//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod course_form;
pub mod delete_dialog;
pub mod export_dialog;
pub mod filter_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod message_dialog;
pub mod quit_dialog;
pub mod upload_dialog;

pub use course_form::{CourseForm, FormMode};
pub use delete_dialog::DeleteDialog;
pub use export_dialog::ExportDialog;
pub use filter_dialog::FilterDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use message_dialog::MessageDialog;
pub use quit_dialog::QuitDialog;
pub use upload_dialog::UploadDialog;
