//! Core error types for upkeep-core.
//!
//! The engine operations themselves are total; errors only arise at the
//! boundaries where callers hand in task lists or request status changes.

use thiserror::Error;

use crate::task::TaskStatus;

/// Core error type for upkeep-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No task with the given id exists on the board
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// The requested status change is not one of the board's controls
    #[error("Invalid transition for task '{id}': {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: TaskStatus,
        to: TaskStatus,
    },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Two tasks in one list share an id
    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
