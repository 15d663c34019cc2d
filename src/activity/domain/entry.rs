//! Immutable activity log entries.

use super::{ActivityEntryId, ParseActivityActionError};
use crate::access::domain::ProjectId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What a state-changing operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// An entity was created.
    Created,
    /// Non-status fields of an entity changed.
    Updated,
    /// A task's lifecycle status changed.
    StatusChanged,
    /// An entity was deleted.
    Deleted,
    /// A comment was added.
    Commented,
    /// A dependency edge was added.
    DependencyAdded,
    /// A dependency edge was removed.
    DependencyRemoved,
}

impl ActivityAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Deleted => "deleted",
            Self::Commented => "commented",
            Self::DependencyAdded => "dependency_added",
            Self::DependencyRemoved => "dependency_removed",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivityAction {
    type Error = ParseActivityActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "status_changed" => Ok(Self::StatusChanged),
            "deleted" => Ok(Self::Deleted),
            "commented" => Ok(Self::Commented),
            "dependency_added" => Ok(Self::DependencyAdded),
            "dependency_removed" => Ok(Self::DependencyRemoved),
            _ => Err(ParseActivityActionError(value.to_owned())),
        }
    }
}

/// Kind of entity an activity entry or notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A task.
    Task,
    /// A project.
    Project,
    /// An organization.
    Organization,
    /// A comment on a task.
    Comment,
}

impl EntityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Organization => "organization",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only record of a state-changing operation.
///
/// Entries are never mutated or deleted after being written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    id: ActivityEntryId,
    action: ActivityAction,
    entity_kind: EntityKind,
    entity_id: Uuid,
    actor: UserId,
    project_id: ProjectId,
    changes: Option<serde_json::Value>,
    recorded_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Creates a new entry stamped with the current clock time.
    #[must_use]
    pub fn new(
        action: ActivityAction,
        entity_kind: EntityKind,
        entity_id: Uuid,
        actor: UserId,
        project_id: ProjectId,
        changes: Option<serde_json::Value>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ActivityEntryId::new(),
            action,
            entity_kind,
            entity_id,
            actor,
            project_id,
            changes,
            recorded_at: clock.utc(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityEntryId {
        self.id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the kind of the affected entity.
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// Returns the identifier of the affected entity.
    #[must_use]
    pub const fn entity_id(&self) -> Uuid {
        self.entity_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the project scope.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the structured change payload, if any.
    #[must_use]
    pub const fn changes(&self) -> Option<&serde_json::Value> {
        self.changes.as_ref()
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
