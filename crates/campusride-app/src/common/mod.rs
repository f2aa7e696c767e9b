//! Shared helpers for the controller.

mod task;

pub use task::{TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
