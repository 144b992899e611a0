//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that coordinates the catalog state, the backend client, and
//! the child components. All state mutation happens here on the main loop
//! thread; worker threads only run HTTP requests and report back through
//! the request runner.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, CourseForm, DeleteDialog, ExportDialog, FilterDialog, HelpDialog,
    HomeComponent, HomeRenderContext, MessageDialog, QuitDialog, UploadDialog,
};
use crate::config::Config;
use crate::model::catalog::{CatalogState, CheckboxState, FilterCriteria};
use crate::model::course::{FilterOptions, UploadReport};
use crate::model::modal::{FilterDimension, Modal, ModalStack};
use crate::model::render::build_render_surface;
use crate::services::{ApiResponse, CatalogClient, CourseQuery, RequestRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Loaded configuration
    pub config: Config,

    /// Resolved API base URL (config or environment override)
    pub api_url: String,

    /// Selection & filter state engine
    pub state: CatalogState,

    /// Distinct values for the dimension filter dialogs
    pub options: FilterOptions,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background request runner
    pub runner: RequestRunner,

    /// Backend client; cloned into worker threads
    pub client: CatalogClient,

    /// Refresh counter; catalog responses with an older generation are stale
    /// and get discarded
    pub refresh_generation: u64,

    /// Whether a catalog refresh is in flight
    pub loading: bool,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub quit_dialog: QuitDialog,
    pub course_form: CourseForm,
    pub delete_dialog: DeleteDialog,
    pub filter_dialog: FilterDialog,
    pub upload_dialog: UploadDialog,
    pub export_dialog: ExportDialog,
    pub message_dialog: MessageDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance
    pub fn new() -> Result<App> {
        let config = Config::load().unwrap_or_default();
        let api_url = config.resolved_api_url();
        let client = CatalogClient::new(&api_url)?;

        Ok(App {
            config,
            api_url,
            state: CatalogState::new(),
            options: FilterOptions::default(),
            modals: ModalStack::new(),
            runner: RequestRunner::new(),
            client,
            refresh_generation: 0,
            loading: false,
            should_quit: false,
            error: None,
            status_message: None,
            home: HomeComponent::new(),
            quit_dialog: QuitDialog,
            course_form: CourseForm::new(),
            delete_dialog: DeleteDialog::default(),
            filter_dialog: FilterDialog::new(),
            upload_dialog: UploadDialog::default(),
            export_dialog: ExportDialog::default(),
            message_dialog: MessageDialog::default(),
            help_dialog: HelpDialog::default(),
        })
    }

    /// Kick off a catalog + filter options refresh in the background.
    /// Bumping the generation first makes any response still in flight
    /// stale on arrival.
    fn start_refresh(&mut self) {
        self.refresh_generation += 1;
        self.loading = true;

        let generation = self.refresh_generation;
        let client = self.client.clone();
        self.runner.spawn(move || ApiResponse::Catalog {
            generation,
            result: client.list(&CourseQuery::default()),
        });

        let client = self.client.clone();
        self.runner
            .spawn(move || ApiResponse::Options(client.options()));
    }

    /// Mutate the filter criteria and re-derive the view
    fn edit_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        let mut criteria = self.state.criteria().clone();
        edit(&mut criteria);
        self.state.apply_filter(criteria);
        self.home.clamp_cursor(self.state.visible_count());
    }

    /// Distinct values for one dimension, preferring the backend's options
    /// endpoint and falling back to the current snapshot
    fn dimension_values(&self, dimension: FilterDimension) -> Vec<String> {
        let from_options = match dimension {
            FilterDimension::Area => &self.options.areas,
            FilterDimension::Methodology => &self.options.methodologies,
            FilterDimension::Tier => &self.options.tiers,
        };
        if !from_options.is_empty() {
            return from_options.clone();
        }

        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for course in self.state.visible_courses() {
            let value = match dimension {
                FilterDimension::Area => course.area_value(),
                FilterDimension::Methodology => course.methodology.as_str(),
                FilterDimension::Tier => course.tier.as_str(),
            };
            if !value.is_empty() && seen.insert(value.to_string()) {
                values.push(value.to_string());
            }
        }
        values.sort();
        values
    }

    fn active_dimension_set(&self, dimension: FilterDimension) -> &HashSet<String> {
        let criteria = self.state.criteria();
        match dimension {
            FilterDimension::Area => &criteria.areas,
            FilterDimension::Methodology => &criteria.methodologies,
            FilterDimension::Tier => &criteria.tiers,
        }
    }

    /// Apply one completed background response
    fn apply_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Catalog { generation, result } => {
                if generation != self.refresh_generation {
                    // A newer refresh is already in flight; this snapshot
                    // would roll the view back.
                    return;
                }
                self.loading = false;
                match result {
                    Ok(courses) => {
                        self.error = None;
                        self.state.set_snapshot(courses);
                        self.home.clamp_cursor(self.state.visible_count());
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ApiResponse::Options(result) => match result {
                Ok(options) => self.options = options,
                // Filter dialogs fall back to snapshot values.
                Err(_) => {}
            },
            ApiResponse::Mutation(result) => match result {
                Ok(message) => {
                    self.error = None;
                    self.status_message = Some(message);
                    self.start_refresh();
                }
                Err(e) => self.error = Some(e.to_string()),
            },
            ApiResponse::Upload(result) => match result {
                Ok(report) => {
                    self.error = None;
                    self.open_upload_report(&report);
                    self.start_refresh();
                }
                Err(e) => self.error = Some(e.to_string()),
            },
            ApiResponse::Export(result) => match result {
                Ok(path) => {
                    self.error = None;
                    self.status_message = Some(format!("Exported to {}", path.display()));
                }
                Err(e) => self.error = Some(e.to_string()),
            },
        }
    }

    fn open_upload_report(&mut self, report: &UploadReport) {
        let mut lines = vec![format!("Imported {} course(s).", report.courses_added)];
        if !report.errors.is_empty() {
            lines.push(String::new());
            lines.push(format!("{} row(s) skipped:", report.errors.len()));
            for error in &report.errors {
                lines.push(format!("  {}", error));
            }
        }
        self.message_dialog.open("Upload Result", lines);
        self.modals.push(Modal::Message);
    }

    /// The course under the cursor, cloned out of the snapshot
    fn highlighted_course(&self) -> Option<crate::model::course::Course> {
        self.state.visible_course(self.home.cursor).cloned()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.start_refresh();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            if let Some(modal) = self.modals.top().cloned() {
                return self.handle_modal_key_event(&modal, key);
            }
        }
        if self.home.search_mode {
            return self.handle_search_key_event(key);
        }
        self.home.handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                for response in self.runner.poll() {
                    self.apply_response(response);
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.home.next(self.state.visible_count()),
            Action::PrevItem => self.home.previous(self.state.visible_count()),
            Action::FirstItem => self.home.first(),
            Action::LastItem => self.home.last(self.state.visible_count()),

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.home.enter_search_mode(),
            Action::ExitSearchMode => self.home.exit_search_mode(),
            Action::SearchInput(c) => {
                self.edit_criteria(|criteria| criteria.search.push(c));
                self.home.first();
            }
            Action::SearchBackspace => {
                self.edit_criteria(|criteria| {
                    criteria.search.pop();
                });
                self.home.first();
            }
            Action::CycleSearchScope => {
                self.edit_criteria(|criteria| criteria.scope = criteria.scope.next());
            }

            // ─────────────────────────────────────────────────────────────────
            // Selection
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleCourseSelection => {
                if let Some(course) = self.highlighted_course() {
                    self.state.toggle_selection(course.id);
                }
            }
            Action::ToggleSelectAll => {
                // Header checkbox semantics: checked means everything
                // visible is selected, so the toggle deselects the view.
                match self.state.select_all_checkbox_state() {
                    CheckboxState::Checked => self.state.deselect_all_visible(),
                    _ => self.state.select_all_visible(),
                }
            }
            Action::ClearSelection => {
                self.state.clear_selection();
            }

            // ─────────────────────────────────────────────────────────────────
            // Filters & View
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilter(dimension) => {
                let values = self.dimension_values(dimension);
                let active = self.active_dimension_set(dimension).clone();
                self.filter_dialog.open(dimension, values, &active);
                self.modals.push(Modal::Filter { dimension });
            }
            Action::SetDimensionFilter(dimension, values) => {
                let set: HashSet<String> = values.into_iter().collect();
                self.edit_criteria(|criteria| match dimension {
                    FilterDimension::Area => criteria.areas = set,
                    FilterDimension::Methodology => criteria.methodologies = set,
                    FilterDimension::Tier => criteria.tiers = set,
                });
                self.modals.pop();
            }
            Action::ClearFilters => {
                self.state.apply_filter(FilterCriteria::default());
                self.home.first();
            }
            Action::ToggleViewMode => self.home.toggle_view_mode(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenAddCourse => {
                self.course_form.reset_create();
                self.modals.push(Modal::AddCourse);
            }
            Action::OpenEditCourse => {
                if let Some(course) = self.highlighted_course() {
                    self.course_form.load_course(&course);
                    self.modals.push(Modal::EditCourse { id: course.id });
                }
            }
            Action::OpenDeleteConfirm => {
                if let Some(course) = self.highlighted_course() {
                    self.delete_dialog.open(course.id, &course.name);
                    self.modals.push(Modal::ConfirmDelete {
                        id: course.id,
                        name: course.name,
                    });
                }
            }
            Action::OpenUpload => {
                self.upload_dialog.reset();
                self.modals.push(Modal::Upload);
            }
            Action::OpenExport => {
                let count = self.state.selection_summary().selected;
                if count == 0 {
                    self.error = Some("Select at least one course to export".to_string());
                } else {
                    self.export_dialog.open(
                        &self.config.export_design,
                        &self.config.export_title,
                        count,
                    );
                    self.modals.push(Modal::Export);
                }
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {
                // Dialogs adjust their own cursor in handle_key_event.
            }

            // ─────────────────────────────────────────────────────────────────
            // Backend Operations
            // ─────────────────────────────────────────────────────────────────
            Action::RefreshCatalog => {
                self.status_message = None;
                self.start_refresh();
            }
            Action::SubmitCreate(draft) => {
                self.modals.pop();
                let client = self.client.clone();
                self.runner
                    .spawn(move || ApiResponse::Mutation(client.create(&draft)));
            }
            Action::SubmitUpdate(id, draft) => {
                self.modals.pop();
                let client = self.client.clone();
                self.runner
                    .spawn(move || ApiResponse::Mutation(client.update(id, &draft)));
            }
            Action::DeleteCourse(id) => {
                self.modals.pop();
                let client = self.client.clone();
                self.runner
                    .spawn(move || ApiResponse::Mutation(client.delete(id)));
            }
            Action::UploadFile(path) => {
                self.modals.pop();
                self.status_message = Some(format!("Uploading {}…", path.display()));
                let client = self.client.clone();
                self.runner
                    .spawn(move || ApiResponse::Upload(client.upload(&path)));
            }
            Action::ExportPdf { design, title } => {
                self.modals.pop();

                // Remember the chosen options as the new defaults.
                self.config.export_design = design.clone();
                self.config.export_title = title.clone();
                let _ = self.config.save();

                let ids = self.state.selected_ids();
                let dest_dir = self.config.resolved_download_dir();
                self.status_message = Some(format!("Exporting {} course(s)…", ids.len()));
                let client = self.client.clone();
                self.runner.spawn(move || {
                    ApiResponse::Export(client.export_pdf(&ids, &design, &title, &dest_dir))
                });
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let surface = build_render_surface(&self.state, self.home.view_mode);
        let criteria = self.state.criteria().clone();
        let api_url = self.api_url.clone();
        let error = self.error.clone();
        let status_message = self.status_message.clone();
        let ctx = HomeRenderContext {
            surface: &surface,
            criteria: &criteria,
            api_url: &api_url,
            error: error.as_deref(),
            status_message: status_message.as_deref(),
            loading: self.loading,
        };

        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::AddCourse | Modal::EditCourse { .. } => self.course_form.handle_key_event(key),
            Modal::ConfirmDelete { .. } => self.delete_dialog.handle_key_event(key),
            Modal::Filter { .. } => self.filter_dialog.handle_key_event(key),
            Modal::Upload => self.upload_dialog.handle_key_event(key),
            Modal::Export => self.export_dialog.handle_key_event(key),
            Modal::Message => self.message_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Tab => Some(Action::CycleSearchScope),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::AddCourse | Modal::EditCourse { .. } => self.course_form.draw(frame, area)?,
            Modal::ConfirmDelete { .. } => self.delete_dialog.draw(frame, area)?,
            Modal::Filter { .. } => self.filter_dialog.draw(frame, area)?,
            Modal::Upload => self.upload_dialog.draw(frame, area)?,
            Modal::Export => self.export_dialog.draw(frame, area)?,
            Modal::Message => self.message_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::course::Course;

    fn course(id: i64, name: &str, tier: &str) -> Course {
        Course {
            id,
            name: name.to_string(),
            area: Some("X".to_string()),
            methodology: "EAD".to_string(),
            tier: tier.to_string(),
            created_at: None,
            active: true,
        }
    }

    fn app_with_courses(courses: Vec<Course>) -> App {
        let mut app = App::new().unwrap();
        app.state.set_snapshot(courses);
        app
    }

    #[test]
    fn test_toggle_select_all_cycles_through_checkbox_states() {
        let mut app = app_with_courses(vec![course(1, "A", "Baixo"), course(2, "B", "Alto")]);

        app.update(Action::ToggleSelectAll).unwrap();
        assert_eq!(app.state.selected_ids(), vec![1, 2]);

        app.update(Action::ToggleSelectAll).unwrap();
        assert!(app.state.selected_ids().is_empty());
    }

    #[test]
    fn test_search_input_narrows_view_and_resets_cursor() {
        let mut app = app_with_courses(vec![course(1, "Alpha", "Baixo"), course(2, "Beta", "Alto")]);
        app.home.last(app.state.visible_count());

        app.update(Action::SearchInput('b')).unwrap();
        assert_eq!(app.state.visible_count(), 1);
        assert_eq!(app.home.cursor, 0);

        app.update(Action::SearchBackspace).unwrap();
        assert_eq!(app.state.visible_count(), 2);
    }

    #[test]
    fn test_set_dimension_filter_applies_and_closes_modal() {
        let mut app = app_with_courses(vec![course(1, "A", "Baixo"), course(2, "B", "Alto")]);
        app.update(Action::OpenFilter(FilterDimension::Tier)).unwrap();
        assert!(!app.modals.is_empty());

        app.update(Action::SetDimensionFilter(
            FilterDimension::Tier,
            vec!["Alto".to_string()],
        ))
        .unwrap();

        assert!(app.modals.is_empty());
        assert_eq!(app.state.visible_count(), 1);
    }

    #[test]
    fn test_export_requires_a_selection() {
        let mut app = app_with_courses(vec![course(1, "A", "Baixo")]);

        app.update(Action::OpenExport).unwrap();
        assert!(app.modals.is_empty());
        assert!(app.error.is_some());

        app.state.toggle_selection(1);
        app.error = None;
        app.update(Action::OpenExport).unwrap();
        assert_eq!(app.modals.top(), Some(&Modal::Export));
    }

    #[test]
    fn test_stale_catalog_response_is_discarded() {
        let mut app = app_with_courses(vec![course(1, "A", "Baixo")]);
        app.refresh_generation = 2;

        app.apply_response(ApiResponse::Catalog {
            generation: 1,
            result: Ok(vec![]),
        });
        // The old empty snapshot did not overwrite the newer state.
        assert_eq!(app.state.selection_summary().total, 1);

        app.apply_response(ApiResponse::Catalog {
            generation: 2,
            result: Ok(vec![course(3, "C", "Alto")]),
        });
        assert_eq!(app.state.selection_summary().total, 1);
        assert!(app.state.course_by_id(3).is_some());
    }

    #[test]
    fn test_failed_refresh_leaves_state_untouched() {
        let mut app = app_with_courses(vec![course(1, "A", "Baixo")]);
        app.refresh_generation = 1;

        app.apply_response(ApiResponse::Catalog {
            generation: 1,
            result: Err(crate::services::ApiError::Status(502)),
        });

        assert_eq!(app.state.selection_summary().total, 1);
        assert!(app.error.is_some());
    }

    #[test]
    fn test_upload_report_opens_message_dialog() {
        let mut app = app_with_courses(vec![course(1, "A", "Baixo")]);

        app.apply_response(ApiResponse::Upload(Ok(UploadReport {
            courses_added: 2,
            errors: vec!["row 3: missing name".to_string()],
        })));

        // The modal marker is payload-free; the dialog owns the content.
        assert_eq!(app.modals.top(), Some(&Modal::Message));
        assert!(app.message_dialog.lines.iter().any(|l| l.contains("row 3")));
    }

    #[test]
    fn test_clear_filters_restores_full_view() {
        let mut app = app_with_courses(vec![course(1, "Alpha", "Baixo"), course(2, "Beta", "Alto")]);
        app.update(Action::SearchInput('x')).unwrap();
        assert_eq!(app.state.visible_count(), 0);

        app.update(Action::ClearFilters).unwrap();
        assert_eq!(app.state.visible_count(), 2);
    }
}
