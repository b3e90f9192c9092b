/// Display options resolved from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
}

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Where the task rows were last drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListViewport {
    pub area: Region,
    /// Index of the first visible task.
    pub offset: usize,
}

impl ListViewport {
    /// Row index under `(column, row)`, counting from the first task.
    #[must_use]
    pub fn index_at(&self, column: u16, row: u16) -> Option<usize> {
        self.area
            .contains(column, row)
            .then(|| self.offset + usize::from(row - self.area.y))
    }
}

/// Clickable areas from the last frame.
///
/// Written by the renderer every frame and read back by mouse handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub name_field: Region,
    pub add_button: Region,
    pub list: ListViewport,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    NameField,
    AddButton,
    /// A row of the task list, by index into the visible tasks.
    Task(usize),
}
