//! Task persistence port.

use crate::access::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Store for task aggregates.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier is
    /// already taken.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces a task, conditional on the stored version.
    ///
    /// `expected_version` is the version the caller read before mutating;
    /// `task` carries the bumped version to write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::VersionConflict`] when the stored
    /// version no longer matches `expected_version`, meaning a concurrent
    /// writer got there first.
    async fn update(&self, task: &Task, expected_version: u64) -> TaskRepositoryResult<()>;

    /// Fetches a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Fetches the tasks for the given identifiers, skipping missing ones.
    async fn find_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Fetches all tasks in a project.
    async fn find_by_project(&self, project: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with this identifier already exists.
    #[error("duplicate task: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored version no longer matches the caller's expectation.
    #[error("version conflict on task {0}")]
    VersionConflict(TaskId),

    /// Persistence-layer failure.
    #[error("task store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
