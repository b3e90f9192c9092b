//! The task entity and its name newtype.

use std::fmt;
use std::ops::Deref;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::TaskId;

/// A task name holding at least one non-whitespace character.
///
/// The text is kept exactly as typed; surrounding whitespace only matters
/// for the blank check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskName(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskNameError {
    #[error("task name must not be empty")]
    Empty,
}

impl TaskName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TaskNameError> {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            return Err(TaskNameError::Empty);
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for TaskName {
    type Error = TaskNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for TaskName {
    type Error = TaskNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Deref for TaskName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A to-do item.
///
/// `is_complete` only ever moves from `false` to `true`; tasks are never
/// deleted, so a completed task simply drops out of the incomplete list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub name: TaskName,
    pub is_complete: bool,
    pub date_added: DateTime<Utc>,
}

impl Task {
    /// A fresh, incomplete task stamped with `date_added`.
    #[must_use]
    pub fn new(name: TaskName, date_added: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::generate(),
            name,
            is_complete: false,
            date_added,
        }
    }
}
