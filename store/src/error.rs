use std::path::PathBuf;

use thiserror::Error;

use tasklist_types::TaskId;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to prepare {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open task database at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("task database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("no task with id {0}")]
    NotFound(TaskId),
    #[error("corrupt task row {id}: {reason}")]
    CorruptRow { id: String, reason: String },
}
