//! Dependency edge persistence port.

use crate::task::domain::{DependencyEdge, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dependency repository operations.
pub type DependencyRepositoryResult<T> = Result<T, DependencyRepositoryError>;

/// Store for BLOCKED_BY edges.
///
/// Implementations store edges verbatim; acyclicity and same-project checks
/// belong to the graph service, which serialises insertions per project.
#[async_trait]
pub trait DependencyRepository: Send + Sync {
    /// Persists a new edge.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyRepositoryError::DuplicateEdge`] when the pair is
    /// already linked.
    async fn insert(&self, edge: &DependencyEdge) -> DependencyRepositoryResult<()>;

    /// Removes the edge between a parent and child.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyRepositoryError::EdgeNotFound`] when no such edge
    /// exists.
    async fn remove(&self, parent: TaskId, child: TaskId) -> DependencyRepositoryResult<()>;

    /// Returns the tasks blocking `child`.
    async fn blockers_of(&self, child: TaskId) -> DependencyRepositoryResult<Vec<TaskId>>;

    /// Returns the tasks blocked by `parent`.
    async fn dependents_of(&self, parent: TaskId) -> DependencyRepositoryResult<Vec<TaskId>>;

    /// Removes every edge in which `child` is the blocked side.
    ///
    /// Used when deleting a task to drop its own blocker links.
    async fn remove_edges_of_child(&self, child: TaskId) -> DependencyRepositoryResult<()>;
}

/// Errors returned by dependency repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DependencyRepositoryError {
    /// The pair is already linked.
    #[error("dependency edge already exists: {child} blocked by {parent}")]
    DuplicateEdge {
        /// The blocking task.
        parent: TaskId,
        /// The blocked task.
        child: TaskId,
    },

    /// No edge exists between the pair.
    #[error("dependency edge not found: {child} blocked by {parent}")]
    EdgeNotFound {
        /// The blocking task.
        parent: TaskId,
        /// The blocked task.
        child: TaskId,
    },

    /// Persistence-layer failure.
    #[error("dependency store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DependencyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
