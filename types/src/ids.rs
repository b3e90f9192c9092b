use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuid::Uuid;

/// Stable identity of a task.
///
/// Minted once when the task is added and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

#[derive(Debug, Error)]
#[error("invalid task id {raw:?}: {source}")]
pub struct TaskIdParseError {
    raw: String,
    #[source]
    source: uuid::Error,
}

impl TaskId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TaskId {
    type Err = TaskIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|source| TaskIdParseError {
                raw: s.to_string(),
                source,
            })
    }
}
