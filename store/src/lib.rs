//! Local persistence for tasks.
//!
//! A single SQLite file holds every task ever added. Tasks are inserted by
//! [`TaskStore::add_task`], flipped to complete by [`TaskStore::complete_task`],
//! and read back through the [`TaskStore::incomplete_tasks`] query. Nothing is
//! ever deleted.

mod error;
mod sqlite_security;
mod task_store;

pub use error::{StoreError, StoreResult};
pub use task_store::TaskStore;
