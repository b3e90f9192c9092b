//! SQLite-backed task table.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use tasklist_types::{Task, TaskId, TaskName};

use crate::error::{StoreError, StoreResult};
use crate::sqlite_security::prepare_db_path;

const SCHEMA_VERSION: i64 = 1;

/// Persistent store for tasks.
pub struct TaskStore {
    db: Connection,
}

impl TaskStore {
    // `seq` breaks ties between tasks added within the same microsecond so the
    // newest-first order stays total.
    const SCHEMA: &'static str = r"
        CREATE TABLE IF NOT EXISTS tasks (
            seq INTEGER PRIMARY KEY,
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            is_complete INTEGER NOT NULL DEFAULT 0,
            date_added TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_incomplete
        ON tasks(is_complete, date_added);
    ";

    /// Open or create the task database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        prepare_db_path(path)?;

        let db = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::initialize(db)?;
        tracing::info!(path = %path.display(), "Task store opened");
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Connection::open_in_memory()?;
        Self::initialize(db)
    }

    fn initialize(db: Connection) -> StoreResult<Self> {
        db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")?;
        db.execute_batch(Self::SCHEMA)?;
        let version: i64 = db.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version < SCHEMA_VERSION {
            db.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        }
        Ok(Self { db })
    }

    /// Insert a new incomplete task stamped with the current time.
    pub fn add_task(&mut self, name: TaskName) -> StoreResult<Task> {
        self.add_task_at(name, Utc::now())
    }

    /// Insert a new incomplete task with an explicit creation time.
    pub fn add_task_at(&mut self, name: TaskName, date_added: DateTime<Utc>) -> StoreResult<Task> {
        let task = Task::new(name, truncate_to_micros(date_added));
        self.db.execute(
            "INSERT INTO tasks (id, name, is_complete, date_added)
             VALUES (?1, ?2, 0, ?3)",
            params![
                task.id.to_string(),
                task.name.as_str(),
                format_timestamp(task.date_added)
            ],
        )?;
        tracing::debug!(id = %task.id, "Task added");
        Ok(task)
    }

    /// Mark the task with `id` complete.
    ///
    /// Completing a task that is already complete succeeds without change.
    pub fn complete_task(&mut self, id: TaskId) -> StoreResult<Task> {
        let changed = self.db.execute(
            "UPDATE tasks SET is_complete = 1 WHERE id = ?1",
            params![id.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::debug!(id = %id, "Task completed");
        self.task(id)?.ok_or(StoreError::NotFound(id))
    }

    /// Look up a single task by id.
    pub fn task(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let raw = self
            .db
            .query_row(
                "SELECT id, name, is_complete, date_added FROM tasks WHERE id = ?1 LIMIT 1",
                params![id.to_string()],
                RawTask::from_row,
            )
            .optional()?;
        raw.map(RawTask::into_task).transpose()
    }

    /// Every task not yet completed, newest first.
    ///
    /// Rows that no longer decode into a [`Task`] are logged and skipped.
    pub fn incomplete_tasks(&self) -> StoreResult<Vec<Task>> {
        let mut stmt = self.db.prepare(
            "SELECT id, name, is_complete, date_added
             FROM tasks
             WHERE is_complete = 0
             ORDER BY date_added DESC, seq DESC",
        )?;
        let rows = stmt.query_map([], RawTask::from_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            match row?.into_task() {
                Ok(task) => tasks.push(task),
                Err(err) => tracing::warn!("Skipping unreadable task row: {err}"),
            }
        }
        Ok(tasks)
    }

    pub fn completed_count(&self) -> StoreResult<u64> {
        let count: i64 =
            self.db
                .query_row("SELECT COUNT(*) FROM tasks WHERE is_complete = 1", [], |row| {
                    row.get(0)
                })?;
        Ok(count.max(0) as u64)
    }
}

/// Column values before domain validation.
struct RawTask {
    id: String,
    name: String,
    is_complete: bool,
    date_added: String,
}

impl RawTask {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            is_complete: row.get(2)?,
            date_added: row.get(3)?,
        })
    }

    fn into_task(self) -> StoreResult<Task> {
        let corrupt = |reason: String| StoreError::CorruptRow {
            id: self.id.clone(),
            reason,
        };
        let id = self.id.parse::<TaskId>().map_err(|e| corrupt(e.to_string()))?;
        let name = TaskName::new(&self.name).map_err(|e| corrupt(e.to_string()))?;
        let date_added = parse_timestamp(&self.date_added)
            .ok_or_else(|| corrupt(format!("bad timestamp {:?}", self.date_added)))?;
        Ok(Task {
            id,
            name,
            is_complete: self.is_complete,
            date_added,
        })
    }
}

/// Fixed-width RFC 3339, so text order in SQLite matches time order.
fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn truncate_to_micros(time: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = time.nanosecond();
    time.with_nanosecond(nanos - nanos % 1_000).unwrap_or(time)
}
