//! Input mode wrappers for type-safe mode-specific operations.
//!
//! Editing the task name is only possible through [`InsertMode`], which can
//! only be obtained with an [`InsertToken`] proving the field has focus.

use tasklist_types::ui::DraftInput;

use crate::App;
use crate::state::InputState;

/// Proof token for Insert mode operations.
#[derive(Debug)]
pub struct InsertToken(());

/// Mode wrapper for safe insert operations.
pub struct InsertMode<'a> {
    app: &'a mut App,
}

impl App {
    /// Get proof token if the name field currently has focus.
    pub fn insert_token(&self) -> Option<InsertToken> {
        matches!(&self.input, InputState::Insert(_)).then_some(InsertToken(()))
    }

    /// Get insert mode wrapper (requires proof token).
    pub fn insert_mode(&mut self, _token: InsertToken) -> InsertMode<'_> {
        InsertMode { app: self }
    }
}

impl InsertMode<'_> {
    fn draft_mut(&mut self) -> &mut DraftInput {
        self.app.input.draft_mut()
    }

    pub fn move_cursor_left(&mut self) {
        self.draft_mut().move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.draft_mut().move_cursor_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.draft_mut().move_cursor_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.draft_mut().move_cursor_end();
    }

    pub fn enter_char(&mut self, c: char) {
        self.draft_mut().enter_char(c);
    }

    pub fn enter_text(&mut self, text: &str) {
        self.draft_mut().enter_text(text);
    }

    pub fn delete_char(&mut self) {
        self.draft_mut().delete_char();
    }

    pub fn delete_char_forward(&mut self) {
        self.draft_mut().delete_char_forward();
    }

    pub fn delete_word_backwards(&mut self) {
        self.draft_mut().delete_word_backwards();
    }

    pub fn clear_line(&mut self) {
        self.draft_mut().clear();
    }

    /// Press the "Add Task" button; focus stays in the field.
    pub fn submit(self) {
        self.app.add_task();
    }
}
