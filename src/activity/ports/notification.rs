//! Notification persistence port.

use crate::activity::domain::{EntityKind, Notification, NotificationId, NotificationKind};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for notification store operations.
pub type NotificationStoreResult<T> = Result<T, NotificationStoreError>;

/// Store for per-recipient notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persists a new notification.
    async fn push(&self, notification: &Notification) -> NotificationStoreResult<()>;

    /// Returns whether an equivalent notification was already delivered to
    /// the recipient for this entity and kind since the cutoff.
    ///
    /// Backs the fan-out's deduplication window.
    async fn exists_since(
        &self,
        recipient: UserId,
        entity_kind: EntityKind,
        entity_id: Uuid,
        kind: NotificationKind,
        cutoff: DateTime<Utc>,
    ) -> NotificationStoreResult<bool>;

    /// Returns all notifications for a recipient, newest first.
    async fn for_recipient(&self, recipient: UserId) -> NotificationStoreResult<Vec<Notification>>;

    /// Marks a notification read on behalf of its recipient.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::NotFound`] when the notification
    /// does not exist and [`NotificationStoreError::NotRecipient`] when the
    /// caller is not the addressee.
    async fn mark_read(
        &self,
        id: NotificationId,
        recipient: UserId,
    ) -> NotificationStoreResult<Notification>;
}

/// Errors returned by notification store implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationStoreError {
    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Only the recipient may mark a notification read.
    #[error("notification {0} does not belong to the caller")]
    NotRecipient(NotificationId),

    /// Persistence-layer failure.
    #[error("notification store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the machine-readable error kind for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::NotRecipient(_) => "forbidden",
            Self::Persistence(_) => "internal",
        }
    }
}
