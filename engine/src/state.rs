//! Input state machine.

use tasklist_types::ui::{DraftInput, InputMode};

/// Tracks the current input mode; the draft survives mode switches.
#[derive(Debug, Clone)]
pub(crate) enum InputState {
    Normal(DraftInput),
    Insert(DraftInput),
}

impl Default for InputState {
    fn default() -> Self {
        Self::Normal(DraftInput::default())
    }
}

impl InputState {
    pub(crate) fn mode(&self) -> InputMode {
        match self {
            Self::Normal(_) => InputMode::Normal,
            Self::Insert(_) => InputMode::Insert,
        }
    }

    pub(crate) fn draft(&self) -> &DraftInput {
        match self {
            Self::Normal(draft) | Self::Insert(draft) => draft,
        }
    }

    pub(crate) fn draft_mut(&mut self) -> &mut DraftInput {
        match self {
            Self::Normal(draft) | Self::Insert(draft) => draft,
        }
    }

    pub(crate) fn into_insert(self) -> Self {
        match self {
            Self::Normal(draft) | Self::Insert(draft) => Self::Insert(draft),
        }
    }

    pub(crate) fn into_normal(self) -> Self {
        match self {
            Self::Normal(draft) | Self::Insert(draft) => Self::Normal(draft),
        }
    }
}
