//! Directed BLOCKED_BY edges between tasks.

use super::TaskId;
use crate::access::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A BLOCKED_BY edge: the child task cannot enter an active status until
/// the parent task is done.
///
/// Both endpoints belong to the same project and the overall edge set per
/// project stays acyclic; both invariants are enforced at insertion time by
/// the graph service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    parent: TaskId,
    child: TaskId,
    project_id: ProjectId,
    created_at: DateTime<Utc>,
}

impl DependencyEdge {
    /// Creates an edge recording that `child` is blocked by `parent`.
    #[must_use]
    pub fn new(parent: TaskId, child: TaskId, project_id: ProjectId, clock: &impl Clock) -> Self {
        Self {
            parent,
            child,
            project_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the blocking task.
    #[must_use]
    pub const fn parent(&self) -> TaskId {
        self.parent
    }

    /// Returns the blocked task.
    #[must_use]
    pub const fn child(&self) -> TaskId {
        self.child
    }

    /// Returns the project both endpoints belong to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns when the edge was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
