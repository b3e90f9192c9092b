//! Core engine for the task list.
//!
//! This crate owns application state without TUI dependencies: the store,
//! the cached incomplete-task list, the list selection, and the name draft.

mod input_modes;
mod state;

pub use input_modes::{InsertMode, InsertToken};
pub use tasklist_store::{StoreError, TaskStore};
pub use tasklist_types::ui::{
    DraftInput, HitRegions, HitTarget, InputMode, ListViewport, Region, UiOptions,
};
pub use tasklist_types::{Task, TaskId, TaskName};

use std::mem;

use state::InputState;

pub struct App {
    store: TaskStore,
    /// Incomplete tasks, newest first, as of the last refresh.
    tasks: Vec<Task>,
    completed_count: u64,
    selected: usize,
    input: InputState,
    ui_options: UiOptions,
    hit_regions: HitRegions,
    should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, ui_options: UiOptions) -> Self {
        let mut app = Self {
            store,
            tasks: Vec::new(),
            completed_count: 0,
            selected: 0,
            input: InputState::default(),
            ui_options,
            hit_regions: HitRegions::default(),
            should_quit: false,
        };
        app.refresh();
        app
    }

    // ========================================================================
    // Task operations
    // ========================================================================

    /// Add a task named after the current draft.
    ///
    /// A blank draft is ignored. On success the draft is cleared and the new
    /// task becomes the selection. Store failures are logged and otherwise
    /// ignored; the draft is kept so nothing typed is lost.
    pub fn add_task(&mut self) {
        let name = match TaskName::new(self.input.draft().text()) {
            Ok(name) => name,
            Err(_) => {
                tracing::debug!("Ignoring add with blank task name");
                return;
            }
        };

        match self.store.add_task(name) {
            Ok(task) => {
                tracing::info!(id = %task.id, "Added task");
                self.input.draft_mut().clear();
                self.refresh();
                self.select_task(task.id);
            }
            Err(err) => {
                tracing::error!("Failed to add task: {err}");
            }
        }
    }

    /// Complete the selected task, if any.
    pub fn complete_selected(&mut self) {
        if let Some(index) = self.selected_index() {
            self.complete_at(index);
        }
    }

    /// Complete the task at `index` in the visible list.
    ///
    /// The selection stays on the same row, so the next task slides under it.
    pub fn complete_at(&mut self, index: usize) {
        let Some(id) = self.tasks.get(index).map(|task| task.id) else {
            return;
        };

        match self.store.complete_task(id) {
            Ok(_) => tracing::info!(id = %id, "Completed task"),
            Err(err) => tracing::error!(id = %id, "Failed to complete task: {err}"),
        }
        self.selected = index;
        self.refresh();
    }

    /// Re-run the incomplete-task query.
    ///
    /// On failure the previous list is kept.
    pub fn refresh(&mut self) {
        match self.store.incomplete_tasks() {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => tracing::error!("Failed to load tasks: {err}"),
        }
        match self.store.completed_count() {
            Ok(count) => self.completed_count = count,
            Err(err) => tracing::warn!("Failed to count completed tasks: {err}"),
        }
        self.clamp_selection();
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn completed_count(&self) -> u64 {
        self.completed_count
    }

    // ========================================================================
    // Selection
    // ========================================================================

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        (!self.tasks.is_empty()).then_some(self.selected)
    }

    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.tasks.len().saturating_sub(1);
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    fn select_task(&mut self, id: TaskId) {
        if let Some(index) = self.tasks.iter().position(|task| task.id == id) {
            self.selected = index;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    // ========================================================================
    // Input
    // ========================================================================

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    #[must_use]
    pub fn draft(&self) -> &DraftInput {
        self.input.draft()
    }

    /// Whether pressing "Add Task" would do anything.
    #[must_use]
    pub fn can_add(&self) -> bool {
        !self.input.draft().is_blank()
    }

    pub fn enter_insert_mode(&mut self) {
        self.input = mem::take(&mut self.input).into_insert();
    }

    pub fn enter_insert_mode_at_end(&mut self) {
        self.input.draft_mut().move_cursor_end();
        self.enter_insert_mode();
    }

    pub fn enter_normal_mode(&mut self) {
        self.input = mem::take(&mut self.input).into_normal();
    }

    /// Move focus between the name field and the list.
    pub fn toggle_focus(&mut self) {
        match self.input_mode() {
            InputMode::Normal => self.enter_insert_mode_at_end(),
            InputMode::Insert => self.enter_normal_mode(),
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn hit_regions(&self) -> HitRegions {
        self.hit_regions
    }

    /// Record where the widgets were drawn, for mouse hit-testing.
    pub fn set_hit_regions(&mut self, regions: HitRegions) {
        self.hit_regions = regions;
    }

    /// What a click at `(column, row)` lands on, if anything.
    ///
    /// Rows of the list area below the last task hit nothing.
    #[must_use]
    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let regions = &self.hit_regions;
        if regions.add_button.contains(column, row) {
            return Some(HitTarget::AddButton);
        }
        if regions.name_field.contains(column, row) {
            return Some(HitTarget::NameField);
        }
        regions
            .list
            .index_at(column, row)
            .filter(|&index| index < self.tasks.len())
            .map(HitTarget::Task)
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests;
