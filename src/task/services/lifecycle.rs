//! The dependency-gated task lifecycle.

use super::support;
use crate::access::{
    ports::MembershipDirectory,
    services::{AccessError, AccessPolicy},
};
use crate::activity::{
    domain::{ActivityAction, EntityKind, NotificationKind},
    services::{ActivityRecord, ActivityRecorder, NotificationFanOut, NotificationRequest},
};
use crate::identity::domain::{Role, UserId};
use crate::task::{
    domain::{NewTask, Task, TaskChangeSet, TaskDomainError, TaskId, TaskStatus},
    ports::{
        DependencyRepository, DependencyRepositoryError, TaskRepository, TaskRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by task lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum TaskLifecycleError {
    /// Access policy denied the operation.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The task does not exist, or the caller may not know whether it does.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Only the creator, an assignee, or a privileged role may act on the
    /// task.
    #[error("forbidden: not an actor on task {0}")]
    NotTaskActor(TaskId),

    /// The requested status is gated on blockers that are not done.
    #[error("cannot enter {requested}: blocked by incomplete tasks {blockers:?}")]
    DependenciesIncomplete {
        /// The status that was requested.
        requested: TaskStatus,
        /// Titles of the blocking tasks that are not done.
        blockers: Vec<String>,
    },

    /// A concurrent writer updated the task first.
    #[error("task {0} was modified concurrently; re-read and retry")]
    Conflict(TaskId),

    /// The task still blocks other tasks and cannot be deleted.
    #[error("task {task} still blocks {dependents} other task(s)")]
    HasDependents {
        /// The task that was to be deleted.
        task: TaskId,
        /// How many tasks it still blocks.
        dependents: usize,
    },

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task storage failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Edge storage failed.
    #[error(transparent)]
    Dependencies(#[from] DependencyRepositoryError),
}

impl TaskLifecycleError {
    /// Returns the machine-readable error kind for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Access(inner) => inner.kind(),
            Self::NotFound(_) => "not_found",
            Self::NotTaskActor(_) => "forbidden",
            Self::DependenciesIncomplete { .. } => "dependencies_incomplete",
            Self::Conflict(_) => "conflict",
            Self::HasDependents { .. } => "has_dependents",
            Self::Domain(_) => "invalid_input",
            Self::Repository(_) | Self::Dependencies(_) => "internal",
        }
    }
}

/// Result type for task lifecycle operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Orchestrates task mutations: access checks, dependency gating,
/// version-conditional writes, then activity and notification fan-out.
///
/// Fan-out runs after the state change committed and never affects the
/// operation's outcome.
pub struct TaskLifecycleService<M, T, E, C>
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
    fanout: NotificationFanOut<C>,
    clock: Arc<C>,
}

impl<M, T, E, C> Clone for TaskLifecycleService<M, T, E, C>
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
            fanout: self.fanout.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M, T, E, C> TaskLifecycleService<M, T, E, C>
where
    M: MembershipDirectory,
    T: TaskRepository,
    E: DependencyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service over task and edge stores.
    #[must_use]
    pub const fn new(
        policy: AccessPolicy<M>,
        tasks: Arc<T>,
        edges: Arc<E>,
        recorder: ActivityRecorder<C>,
        fanout: NotificationFanOut<C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            policy,
            tasks,
            edges,
            recorder,
            fanout,
            clock,
        }
    }

    /// Creates a task on behalf of its creator.
    ///
    /// The creator needs a writing role on the target project. Initial
    /// assignees other than the creator are notified.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Access`] when the creator is not a
    /// member or may not write.
    pub async fn create_task(&self, input: NewTask) -> TaskLifecycleResult<Task> {
        let actor = input.creator();
        let project = input.project_id();
        self.policy
            .ensure_role(actor, project, &Role::WRITERS)
            .await?;

        let task = Task::new(input, &*self.clock);
        self.tasks.insert(&task).await?;

        self.recorder
            .record(
                ActivityRecord::new(
                    ActivityAction::Created,
                    EntityKind::Task,
                    task.id().into_inner(),
                    actor,
                    project,
                )
                .with_changes(serde_json::json!({
                    "title": task.title(),
                    "status": task.status().as_str(),
                    "priority": task.priority().as_str(),
                })),
            )
            .await;

        let assigned: Vec<UserId> = task
            .assignees()
            .iter()
            .copied()
            .filter(|&user| user != actor)
            .collect();
        if !assigned.is_empty() {
            let request = NotificationRequest::new(
                NotificationKind::TaskAssigned,
                "New task assignment",
                format!("You were assigned to '{}'", task.title()),
                EntityKind::Task,
                task.id().into_inner(),
            );
            self.fanout.notify(&assigned, &request).await;
        }
        Ok(task)
    }

    /// Fetches a task on behalf of a project member.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] both when the task does not
    /// exist and when the caller has no membership on its project.
    pub async fn task(&self, actor: UserId, id: TaskId) -> TaskLifecycleResult<Task> {
        let task = self.load(id).await?;
        self.ensure_member(actor, &task).await?;
        Ok(task)
    }

    /// Applies a change set, gating status transitions on blockers.
    ///
    /// A transition into an active status is refused while any blocking task
    /// is not done. The write is version-conditional: if a concurrent writer
    /// updated the task since it was read here, the operation fails with
    /// [`TaskLifecycleError::Conflict`] and no fan-out happens.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotTaskActor`] when the caller is
    /// neither creator, assignee, nor privileged, and
    /// [`TaskLifecycleError::DependenciesIncomplete`] with the blocking
    /// titles when gating refuses the transition.
    pub async fn transition_task(
        &self,
        actor: UserId,
        id: TaskId,
        changes: &TaskChangeSet,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.load(id).await?;
        let role = self.ensure_member(actor, &task).await?;
        if !task.may_be_acted_on_by(actor, role) {
            return Err(TaskLifecycleError::NotTaskActor(id));
        }

        let status_changed = changes
            .status()
            .is_some_and(|requested| requested != task.status());
        if let Some(requested) = changes.status()
            && requested != task.status()
        {
            self.gate_transition(&task, requested).await?;
        }

        let expected = task.version();
        task.apply(changes, &*self.clock);
        task.bump_version();
        self.tasks
            .update(&task, expected)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::VersionConflict(task_id) => {
                    TaskLifecycleError::Conflict(task_id)
                }
                other => TaskLifecycleError::Repository(other),
            })?;

        let action = if status_changed {
            ActivityAction::StatusChanged
        } else {
            ActivityAction::Updated
        };
        self.recorder
            .record(
                ActivityRecord::new(
                    action,
                    EntityKind::Task,
                    id.into_inner(),
                    actor,
                    task.project_id(),
                )
                .with_changes(changes.to_json()),
            )
            .await;

        let followers = task.followers_excluding(actor);
        if !followers.is_empty() {
            let message = changes.status().map_or_else(
                || format!("'{}' was updated", task.title()),
                |status| format!("'{}' moved to {status}", task.title()),
            );
            let request = NotificationRequest::new(
                NotificationKind::TaskUpdated,
                "Task updated",
                message,
                EntityKind::Task,
                id.into_inner(),
            );
            self.fanout.notify(&followers, &request).await;
        }
        Ok(task)
    }

    /// Records a comment on a task and fans out to followers and mentioned
    /// members.
    ///
    /// Any project member may comment, including clients.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the body is empty after
    /// trimming.
    pub async fn comment_on_task(
        &self,
        actor: UserId,
        id: TaskId,
        body: &str,
    ) -> TaskLifecycleResult<()> {
        if body.trim().is_empty() {
            return Err(TaskDomainError::EmptyComment.into());
        }
        let task = self.load(id).await?;
        self.ensure_member(actor, &task).await?;

        self.recorder
            .record(
                ActivityRecord::new(
                    ActivityAction::Commented,
                    EntityKind::Task,
                    id.into_inner(),
                    actor,
                    task.project_id(),
                )
                .with_changes(serde_json::json!({ "comment": body })),
            )
            .await;

        let followers = task.followers_excluding(actor);
        if !followers.is_empty() {
            let request = NotificationRequest::new(
                NotificationKind::CommentAdded,
                "New comment",
                format!("New comment on '{}'", task.title()),
                EntityKind::Task,
                id.into_inner(),
            );
            self.fanout.notify(&followers, &request).await;
        }
        self.fanout
            .notify_mentions(task.project_id(), actor, body, EntityKind::Task, id.into_inner())
            .await;
        Ok(())
    }

    /// Deletes a task that no other task depends on.
    ///
    /// The task's own blocker edges are removed with it; edges where it is
    /// the blocking side make the deletion fail.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::HasDependents`] while other tasks are
    /// still blocked by this one.
    pub async fn delete_task(&self, actor: UserId, id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.load(id).await?;
        let role = self.ensure_member(actor, &task).await?;
        if !task.may_be_acted_on_by(actor, role) {
            return Err(TaskLifecycleError::NotTaskActor(id));
        }

        let dependents = self.edges.dependents_of(id).await?;
        if !dependents.is_empty() {
            return Err(TaskLifecycleError::HasDependents {
                task: id,
                dependents: dependents.len(),
            });
        }

        self.edges.remove_edges_of_child(id).await?;
        self.tasks.remove(id).await?;

        self.recorder
            .record(ActivityRecord::new(
                ActivityAction::Deleted,
                EntityKind::Task,
                id.into_inner(),
                actor,
                task.project_id(),
            ))
            .await;
        Ok(())
    }

    async fn load(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Resolves the caller's role on the task's project. Non-members are
    /// told the task does not exist, so existence leaks nothing to
    /// outsiders.
    async fn ensure_member(&self, actor: UserId, task: &Task) -> TaskLifecycleResult<Role> {
        let resolution = self.policy.resolve(actor, task.project_id()).await?;
        resolution
            .role()
            .ok_or(TaskLifecycleError::NotFound(task.id()))
    }

    async fn gate_transition(
        &self,
        task: &Task,
        requested: TaskStatus,
    ) -> TaskLifecycleResult<()> {
        if !requested.requires_clear_blockers() {
            return Ok(());
        }
        let blockers = support::incomplete_blockers::<_, _, TaskLifecycleError>(
            &*self.tasks,
            &*self.edges,
            task.id(),
        )
        .await?;
        if blockers.is_empty() {
            Ok(())
        } else {
            Err(TaskLifecycleError::DependenciesIncomplete {
                requested,
                blockers: blockers
                    .iter()
                    .map(|blocker| blocker.title().to_owned())
                    .collect(),
            })
        }
    }
}
