//! Thread-safe in-memory dependency edge repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{DependencyEdge, TaskId},
    ports::{DependencyRepository, DependencyRepositoryError, DependencyRepositoryResult},
};

/// Thread-safe in-memory dependency edge repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDependencyRepository {
    state: Arc<RwLock<Vec<DependencyEdge>>>,
}

fn poisoned(err: impl std::fmt::Display) -> DependencyRepositoryError {
    DependencyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryDependencyRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every stored edge.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyRepositoryError::Persistence`] when the backing
    /// store is poisoned.
    pub fn all_edges(&self) -> DependencyRepositoryResult<Vec<DependencyEdge>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.clone())
    }
}

#[async_trait]
impl DependencyRepository for InMemoryDependencyRepository {
    async fn insert(&self, edge: &DependencyEdge) -> DependencyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state
            .iter()
            .any(|e| e.parent() == edge.parent() && e.child() == edge.child())
        {
            return Err(DependencyRepositoryError::DuplicateEdge {
                parent: edge.parent(),
                child: edge.child(),
            });
        }
        state.push(*edge);
        Ok(())
    }

    async fn remove(&self, parent: TaskId, child: TaskId) -> DependencyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let before = state.len();
        state.retain(|e| !(e.parent() == parent && e.child() == child));
        if state.len() == before {
            return Err(DependencyRepositoryError::EdgeNotFound { parent, child });
        }
        Ok(())
    }

    async fn blockers_of(&self, child: TaskId) -> DependencyRepositoryResult<Vec<TaskId>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|e| e.child() == child)
            .map(DependencyEdge::parent)
            .collect())
    }

    async fn dependents_of(&self, parent: TaskId) -> DependencyRepositoryResult<Vec<TaskId>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .iter()
            .filter(|e| e.parent() == parent)
            .map(DependencyEdge::child)
            .collect())
    }

    async fn remove_edges_of_child(&self, child: TaskId) -> DependencyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.retain(|e| e.child() != child);
        Ok(())
    }
}
