//! Best-effort activity recording.

use crate::access::domain::ProjectId;
use crate::activity::{
    domain::{ActivityAction, ActivityLogEntry, EntityKind},
    ports::ActivityLogStore,
};
use crate::identity::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use uuid::Uuid;

/// Payload describing one state-changing operation to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    action: ActivityAction,
    entity_kind: EntityKind,
    entity_id: Uuid,
    actor: UserId,
    project_id: ProjectId,
    changes: Option<serde_json::Value>,
}

impl ActivityRecord {
    /// Creates a record with the required scope fields.
    #[must_use]
    pub const fn new(
        action: ActivityAction,
        entity_kind: EntityKind,
        entity_id: Uuid,
        actor: UserId,
        project_id: ProjectId,
    ) -> Self {
        Self {
            action,
            entity_kind,
            entity_id,
            actor,
            project_id,
            changes: None,
        }
    }

    /// Attaches the structured requested-change payload.
    #[must_use]
    pub fn with_changes(mut self, changes: serde_json::Value) -> Self {
        self.changes = Some(changes);
        self
    }
}

/// Appends activity entries without ever failing the caller.
///
/// A store failure is logged at `warn` and swallowed: the triggering
/// mutation's success is authoritative regardless of fan-out outcome.
pub struct ActivityRecorder<C>
where
    C: Clock + Send + Sync,
{
    store: Arc<dyn ActivityLogStore>,
    clock: Arc<C>,
}

impl<C> Clone for ActivityRecorder<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> ActivityRecorder<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a recorder over an activity log store.
    #[must_use]
    pub const fn new(store: Arc<dyn ActivityLogStore>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Records one activity entry, best-effort.
    pub async fn record(&self, record: ActivityRecord) {
        let ActivityRecord {
            action,
            entity_kind,
            entity_id,
            actor,
            project_id,
            changes,
        } = record;
        let entry = ActivityLogEntry::new(
            action,
            entity_kind,
            entity_id,
            actor,
            project_id,
            changes,
            &*self.clock,
        );
        if let Err(err) = self.store.append(&entry).await {
            tracing::warn!(
                error = %err,
                action = %action,
                entity = %entity_id,
                "activity log write failed; triggering mutation unaffected"
            );
        }
    }
}
