//! Partial-update description for tasks.

use super::{Priority, TaskStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde_json::json;

/// A set of requested field changes for one task update.
///
/// Unset fields are left untouched by [`crate::task::domain::Task::apply`].
/// The set also serialises itself for the activity log so the recorded
/// payload matches exactly what was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChangeSet {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    due_date: Option<DateTime<Utc>>,
    estimated_hours: Option<u32>,
    assignees: Option<Vec<UserId>>,
    watchers: Option<Vec<UserId>>,
}

impl TaskChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Requests a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requests a status transition.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requests a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Requests a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Requests a new effort estimate in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Requests replacement of the assignee list.
    #[must_use]
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = Some(assignees);
        self
    }

    /// Requests replacement of the watcher list.
    #[must_use]
    pub fn with_watchers(mut self, watchers: Vec<UserId>) -> Self {
        self.watchers = Some(watchers);
        self
    }

    /// Returns the requested title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the requested description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the requested status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the requested priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the requested due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the requested effort estimate, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<u32> {
        self.estimated_hours
    }

    /// Returns the requested assignee list, if any.
    #[must_use]
    pub fn assignees(&self) -> Option<&[UserId]> {
        self.assignees.as_deref()
    }

    /// Returns the requested watcher list, if any.
    #[must_use]
    pub fn watchers(&self) -> Option<&[UserId]> {
        self.watchers.as_deref()
    }

    /// Returns whether no field change was requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.estimated_hours.is_none()
            && self.assignees.is_none()
            && self.watchers.is_none()
    }

    /// Serialises the requested changes for the activity log.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut changes = serde_json::Map::new();
        if let Some(title) = &self.title {
            changes.insert("title".to_owned(), json!(title));
        }
        if let Some(description) = &self.description {
            changes.insert("description".to_owned(), json!(description));
        }
        if let Some(status) = self.status {
            changes.insert("status".to_owned(), json!(status.as_str()));
        }
        if let Some(priority) = self.priority {
            changes.insert("priority".to_owned(), json!(priority.as_str()));
        }
        if let Some(due_date) = self.due_date {
            changes.insert("due_date".to_owned(), json!(due_date.to_rfc3339()));
        }
        if let Some(hours) = self.estimated_hours {
            changes.insert("estimated_hours".to_owned(), json!(hours));
        }
        if let Some(assignees) = &self.assignees {
            changes.insert("assignees".to_owned(), json!(assignees));
        }
        if let Some(watchers) = &self.watchers {
            changes.insert("watchers".to_owned(), json!(watchers));
        }
        serde_json::Value::Object(changes)
    }
}
