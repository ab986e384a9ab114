//! The kanban board: task groups, tasks, and drag-and-drop reordering.
//!
//! Groups and tasks carry a dense 0-based `order` column within their
//! container. The [`reorder`] module plans position updates as pure data;
//! [`service`] applies those plans through the repository one update at a
//! time, mirroring how a board client persists a drag.

#![deny(unsafe_code)]

pub mod errors;
pub mod reorder;
pub mod repository;
pub mod service;
pub mod types;

pub use errors::{BoardError, Result};
pub use types::{NewTask, NewTaskGroup, Priority, Task, TaskGroup, UpdateTask, UpdateTaskGroup};
