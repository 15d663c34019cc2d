//! The task aggregate and its lifecycle vocabulary.

use super::{ParsePriorityError, ParseTaskStatusError, TaskChangeSet, TaskDomainError, TaskId};
use crate::access::domain::ProjectId;
use crate::identity::domain::{Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a task.
///
/// Transitions into [`TaskStatus::InProgress`] and [`TaskStatus::InReview`]
/// are gated on every blocking task being done; no other transition is
/// dependency-gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet started.
    Todo,
    /// Actively being worked on.
    InProgress,
    /// Awaiting review.
    InReview,
    /// Completed.
    Done,
    /// Parked behind unresolved blockers.
    Blocked,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    /// Returns whether entering this status requires all blockers done.
    #[must_use]
    pub const fn requires_clear_blockers(self) -> bool {
        matches!(self, Self::InProgress | Self::InReview)
    }

    /// Returns whether this status counts as completed for gating purposes.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Scheduling priority of a task. Informational only; no gating semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    creator: UserId,
    title: String,
    description: Option<String>,
    priority: Priority,
    assignees: Vec<UserId>,
    watchers: Vec<UserId>,
    due_date: Option<DateTime<Utc>>,
    estimated_hours: Option<u32>,
}

impl NewTask {
    /// Creates the minimal valid input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty after
    /// trimming.
    pub fn new(
        project_id: ProjectId,
        creator: UserId,
        title: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            project_id,
            creator,
            title,
            description: None,
            priority: Priority::default(),
            assignees: Vec::new(),
            watchers: Vec::new(),
            due_date: None,
            estimated_hours: None,
        })
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Sets the initial watchers.
    #[must_use]
    pub fn with_watchers(mut self, watchers: Vec<UserId>) -> Self {
        self.watchers = watchers;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the estimated effort in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }
}

/// A unit of work scoped to exactly one project.
///
/// Tasks are born in [`TaskStatus::Todo`] and carry a monotonically
/// increasing version for optimistic concurrency: every successful update
/// bumps it, and stores reject writes whose expected version is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    creator: UserId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: Priority,
    assignees: Vec<UserId>,
    watchers: Vec<UserId>,
    due_date: Option<DateTime<Utc>>,
    estimated_hours: Option<u32>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in [`TaskStatus::Todo`] at version 1.
    #[must_use]
    pub fn new(input: NewTask, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: input.project_id,
            creator: input.creator,
            title: input.title,
            description: input.description,
            status: TaskStatus::Todo,
            priority: input.priority,
            assignees: input.assignees,
            watchers: input.watchers,
            due_date: input.due_date,
            estimated_hours: input.estimated_hours,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assigned users.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assignees
    }

    /// Returns the watching users.
    #[must_use]
    pub fn watchers(&self) -> &[UserId] {
        &self.watchers
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the estimated effort in hours, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<u32> {
        self.estimated_hours
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns when the task was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the task was last updated.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the user is currently assigned.
    #[must_use]
    pub fn is_assignee(&self, user: UserId) -> bool {
        self.assignees.contains(&user)
    }

    /// Returns whether a user may act on this task given their effective
    /// role. Privileged roles act on any task; everyone else only on tasks
    /// they created or are assigned to, with no role floor on that override.
    #[must_use]
    pub fn may_be_acted_on_by(&self, user: UserId, role: Role) -> bool {
        role.is_privileged() || self.creator == user || self.is_assignee(user)
    }

    /// Returns assignees and watchers, deduplicated, with `excluded`
    /// removed. Used to address update notifications.
    #[must_use]
    pub fn followers_excluding(&self, excluded: UserId) -> Vec<UserId> {
        let mut followers: Vec<UserId> = Vec::new();
        for &user in self.assignees.iter().chain(self.watchers.iter()) {
            if user != excluded && !followers.contains(&user) {
                followers.push(user);
            }
        }
        followers
    }

    /// Applies a change set and refreshes the update timestamp.
    ///
    /// Status gating and authorisation are the caller's concern; this only
    /// mutates fields.
    pub fn apply(&mut self, changes: &TaskChangeSet, clock: &impl Clock) {
        if let Some(title) = changes.title() {
            self.title = title.to_owned();
        }
        if let Some(description) = changes.description() {
            self.description = Some(description.to_owned());
        }
        if let Some(status) = changes.status() {
            self.status = status;
        }
        if let Some(priority) = changes.priority() {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date() {
            self.due_date = Some(due_date);
        }
        if let Some(hours) = changes.estimated_hours() {
            self.estimated_hours = Some(hours);
        }
        if let Some(assignees) = changes.assignees() {
            self.assignees = assignees.to_vec();
        }
        if let Some(watchers) = changes.watchers() {
            self.watchers = watchers.to_vec();
        }
        self.updated_at = clock.utc();
    }

    /// Increments the optimistic-concurrency version.
    pub const fn bump_version(&mut self) {
        self.version += 1;
    }
}
