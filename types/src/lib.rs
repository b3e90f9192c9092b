//! Core domain types for the task list.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

#![allow(clippy::missing_errors_doc)]

mod ids;
mod task;
pub mod ui;

pub use ids::{TaskId, TaskIdParseError};
pub use task::{Task, TaskName, TaskNameError};
