//! In-memory append-only activity log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::access::domain::ProjectId;
use crate::activity::{
    domain::{ActivityLogEntry, EntityKind},
    ports::{ActivityLogError, ActivityLogResult, ActivityLogStore},
};

/// Thread-safe in-memory activity log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<Vec<ActivityLogEntry>>>,
}

fn poisoned(err: impl std::fmt::Display) -> ActivityLogError {
    ActivityLogError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every entry in append order.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::Persistence`] when the backing store is
    /// poisoned.
    pub fn all_entries(&self) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl ActivityLogStore for InMemoryActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn entries_for_project(
        &self,
        project: ProjectId,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.project_id() == project)
            .cloned()
            .collect())
    }

    async fn entries_for_entity(
        &self,
        entity_kind: EntityKind,
        entity_id: Uuid,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.entity_kind() == entity_kind && entry.entity_id() == entity_id)
            .cloned()
            .collect())
    }
}
