//! Notifications delivered to users by the fan-out.

use super::{EntityKind, NotificationId, ParseNotificationKindError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The recipient was assigned to a task.
    TaskAssigned,
    /// A task the recipient follows was updated.
    TaskUpdated,
    /// A comment was added to a task the recipient follows.
    CommentAdded,
    /// The recipient was mentioned in free text.
    Mention,
    /// A milestone the recipient follows is due.
    MilestoneDue,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskUpdated => "task_updated",
            Self::CommentAdded => "comment_added",
            Self::Mention => "mention",
            Self::MilestoneDue => "milestone_due",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "task_assigned" => Ok(Self::TaskAssigned),
            "task_updated" => Ok(Self::TaskUpdated),
            "comment_added" => Ok(Self::CommentAdded),
            "mention" => Ok(Self::Mention),
            "milestone_due" => Ok(Self::MilestoneDue),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

/// A message addressed to a single recipient.
///
/// Created only by the fan-out as a side effect of a triggering mutation;
/// mutated only by the recipient marking it read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: UserId,
    kind: NotificationKind,
    title: String,
    message: String,
    read: bool,
    action_url: Option<String>,
    entity_kind: EntityKind,
    entity_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification stamped with the current clock time.
    #[must_use]
    pub fn new(
        recipient: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        entity_kind: EntityKind,
        entity_id: Uuid,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            action_url: None,
            entity_kind,
            entity_id,
            created_at: clock.utc(),
        }
    }

    /// Sets the deep-link for the notification.
    #[must_use]
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether the recipient has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the deep-link, if any.
    #[must_use]
    pub fn action_url(&self) -> Option<&str> {
        self.action_url.as_deref()
    }

    /// Returns the kind of the referenced entity.
    #[must_use]
    pub const fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// Returns the identifier of the referenced entity.
    #[must_use]
    pub const fn entity_id(&self) -> Uuid {
        self.entity_id
    }

    /// Returns when the notification was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification read.
    pub const fn mark_read(&mut self) {
        self.read = true;
    }
}
