//! Error types for the task domain.

use thiserror::Error;

/// Validation errors raised while constructing or mutating a task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskDomainError {
    /// The task title was empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The comment body was empty after trimming.
    #[error("comment body must not be empty")]
    EmptyComment,
}

/// Raised when a string is not a recognised task status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Raised when a string is not a recognised priority.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
