//! Activity log persistence port.

use crate::access::domain::ProjectId;
use crate::activity::domain::{ActivityLogEntry, EntityKind};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Append-only store for activity entries.
#[async_trait]
pub trait ActivityLogStore: Send + Sync {
    /// Appends an entry. Entries are never mutated or deleted afterwards.
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()>;

    /// Returns all entries within a project, oldest first.
    async fn entries_for_project(
        &self,
        project: ProjectId,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>>;

    /// Returns all entries for one entity, oldest first.
    async fn entries_for_entity(
        &self,
        entity_kind: EntityKind,
        entity_id: Uuid,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// Persistence-layer failure.
    #[error("activity log error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
