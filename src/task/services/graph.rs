//! The acyclic BLOCKED_BY dependency graph.

use super::support;
use crate::access::{
    domain::ProjectId,
    ports::MembershipDirectory,
    services::{AccessError, AccessPolicy},
};
use crate::activity::{
    domain::{ActivityAction, EntityKind},
    services::{ActivityRecord, ActivityRecorder},
};
use crate::identity::domain::{Role, UserId};
use crate::task::{
    domain::{DependencyEdge, Task, TaskId},
    ports::{
        DependencyRepository, DependencyRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Reasons a requested edge is structurally invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidDependency {
    /// A task cannot block itself.
    #[error("a task cannot block itself")]
    SelfReference,

    /// Both endpoints must belong to the same project.
    #[error("tasks belong to different projects")]
    CrossProject,

    /// The pair is already linked.
    #[error("the tasks are already linked")]
    Duplicate,

    /// The edge would close a cycle of blockers.
    #[error("the edge would create a circular dependency")]
    Cycle,
}

/// Errors returned by dependency graph operations.
#[derive(Debug, Clone, Error)]
pub enum DependencyGraphError {
    /// Access policy denied the operation.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The referenced task does not exist, or the caller may not know
    /// whether it does.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The requested edge is structurally invalid.
    #[error("invalid dependency: {0}")]
    Invalid(#[from] InvalidDependency),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Edge storage failed.
    #[error(transparent)]
    Edges(#[from] DependencyRepositoryError),
}

impl DependencyGraphError {
    /// Returns the machine-readable error kind for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Access(inner) => inner.kind(),
            Self::TaskNotFound(_) => "not_found",
            Self::Invalid(_) | Self::Edges(DependencyRepositoryError::DuplicateEdge { .. }) => {
                "invalid_dependency"
            }
            Self::Edges(DependencyRepositoryError::EdgeNotFound { .. }) => "not_found",
            Self::Tasks(_) | Self::Edges(DependencyRepositoryError::Persistence(_)) => "internal",
        }
    }
}

/// Result type for dependency graph operations.
pub type DependencyGraphResult<T> = Result<T, DependencyGraphError>;

/// Maintains the per-project BLOCKED_BY graph and its invariants.
///
/// Edge insertion is serialised per project: the duplicate and cycle checks
/// and the insert run under one project-scoped async lock, so two concurrent
/// insertions cannot each pass the cycle check and jointly close a cycle.
pub struct DependencyGraphService<M, T, E, C>
where
    M: MembershipDirectory,
    T: TaskRepository,
    E: DependencyRepository,
    C: Clock + Send + Sync,
{
    policy: AccessPolicy<M>,
    tasks: Arc<T>,
    edges: Arc<E>,
    recorder: ActivityRecorder<C>,
    clock: Arc<C>,
    project_locks: Arc<Mutex<HashMap<ProjectId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl<M, T, E, C> Clone for DependencyGraphService<M, T, E, C>
where
    M: MembershipDirectory,
    T: TaskRepository,
    E: DependencyRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            tasks: Arc::clone(&self.tasks),
            edges: Arc::clone(&self.edges),
            recorder: self.recorder.clone(),
            clock: Arc::clone(&self.clock),
            project_locks: Arc::clone(&self.project_locks),
        }
    }
}

impl<M, T, E, C> DependencyGraphService<M, T, E, C>
where
    M: MembershipDirectory,
    T: TaskRepository,
    E: DependencyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a graph service over task and edge stores.
    #[must_use]
    pub fn new(
        policy: AccessPolicy<M>,
        tasks: Arc<T>,
        edges: Arc<E>,
        recorder: ActivityRecorder<C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            policy,
            tasks,
            edges,
            recorder,
            clock,
            project_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Records that `child` is blocked by `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::Invalid`] for self-references,
    /// cross-project pairs, duplicates and edges that would close a cycle;
    /// [`DependencyGraphError::TaskNotFound`] when either task is missing,
    /// when the caller has no membership on the child's project, or when the
    /// blocking task sits in a project the caller has no membership on; and
    /// [`DependencyGraphError::Access`] when the caller's role may not
    /// write.
    pub async fn add_dependency(
        &self,
        actor: UserId,
        parent: TaskId,
        child: TaskId,
    ) -> DependencyGraphResult<DependencyEdge> {
        if parent == child {
            return Err(InvalidDependency::SelfReference.into());
        }
        let child_task = self.load(child).await?;
        let project = child_task.project_id();
        self.ensure_writer(actor, project, child).await?;
        let parent_task = self.load(parent).await?;
        if parent_task.project_id() != project {
            // The pair is invalid either way; say so only to callers who can
            // already see the blocking task's project.
            let foreign = self.policy.resolve(actor, parent_task.project_id()).await?;
            if foreign.role().is_none() {
                return Err(DependencyGraphError::TaskNotFound(parent));
            }
            return Err(InvalidDependency::CrossProject.into());
        }

        let lock = self.project_lock(project);
        let _guard = lock.lock().await;

        if self.edges.blockers_of(child).await?.contains(&parent) {
            return Err(InvalidDependency::Duplicate.into());
        }
        if self.reaches(parent, child).await? {
            tracing::debug!(
                parent = %parent,
                child = %child,
                "dependency rejected: would close a cycle"
            );
            return Err(InvalidDependency::Cycle.into());
        }

        let edge = DependencyEdge::new(parent, child, project, &*self.clock);
        self.edges.insert(&edge).await?;
        self.recorder
            .record(
                ActivityRecord::new(
                    ActivityAction::DependencyAdded,
                    EntityKind::Task,
                    child.into_inner(),
                    actor,
                    project,
                )
                .with_changes(serde_json::json!({ "blocked_by": parent })),
            )
            .await;
        Ok(edge)
    }

    /// Removes the edge recording that `child` is blocked by `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::Edges`] carrying
    /// [`DependencyRepositoryError::EdgeNotFound`] when the pair is not
    /// linked, plus the same access errors as
    /// [`DependencyGraphService::add_dependency`].
    pub async fn remove_dependency(
        &self,
        actor: UserId,
        parent: TaskId,
        child: TaskId,
    ) -> DependencyGraphResult<()> {
        let child_task = self.load(child).await?;
        let project = child_task.project_id();
        self.ensure_writer(actor, project, child).await?;

        let lock = self.project_lock(project);
        let _guard = lock.lock().await;

        self.edges.remove(parent, child).await?;
        self.recorder
            .record(
                ActivityRecord::new(
                    ActivityAction::DependencyRemoved,
                    EntityKind::Task,
                    child.into_inner(),
                    actor,
                    project,
                )
                .with_changes(serde_json::json!({ "unblocked_by": parent })),
            )
            .await;
        Ok(())
    }

    /// Returns the blocking tasks of `task` that are not yet done.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyGraphError::Tasks`] or
    /// [`DependencyGraphError::Edges`] on lookup failure.
    pub async fn incomplete_blockers(&self, task: TaskId) -> DependencyGraphResult<Vec<Task>> {
        support::incomplete_blockers(&*self.tasks, &*self.edges, task).await
    }

    async fn load(&self, id: TaskId) -> DependencyGraphResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(DependencyGraphError::TaskNotFound(id))
    }

    /// Requires a writing role on the project. Non-members are told the
    /// task does not exist.
    async fn ensure_writer(
        &self,
        actor: UserId,
        project: ProjectId,
        task: TaskId,
    ) -> DependencyGraphResult<()> {
        let resolution = self.policy.resolve(actor, project).await?;
        let Some(role) = resolution.role() else {
            return Err(DependencyGraphError::TaskNotFound(task));
        };
        if role.can_write() {
            Ok(())
        } else {
            Err(AccessError::InsufficientRole {
                resolved: role,
                required: Role::WRITERS.to_vec(),
            }
            .into())
        }
    }

    /// Returns whether `target` is reachable from `from` along existing
    /// blocker edges. Reachability means the prospective edge would close a
    /// cycle.
    async fn reaches(&self, from: TaskId, target: TaskId) -> DependencyGraphResult<bool> {
        let mut queue = VecDeque::from([from]);
        let mut seen = HashSet::from([from]);
        while let Some(current) = queue.pop_front() {
            if current == target {
                return Ok(true);
            }
            for blocker in self.edges.blockers_of(current).await? {
                if seen.insert(blocker) {
                    queue.push_back(blocker);
                }
            }
        }
        Ok(false)
    }

    fn project_lock(&self, project: ProjectId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = match self.project_locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(locks.entry(project).or_default())
    }
}
