//! In-memory notification store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::activity::{
    domain::{EntityKind, Notification, NotificationId, NotificationKind},
    ports::{NotificationStore, NotificationStoreError, NotificationStoreResult},
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory notification store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

fn poisoned(err: impl std::fmt::Display) -> NotificationStoreError {
    NotificationStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryNotificationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored notification in delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationStoreError::Persistence`] when the backing
    /// store is poisoned.
    pub fn all_notifications(&self) -> NotificationStoreResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(poisoned)?;
        Ok(notifications.clone())
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn push(&self, notification: &Notification) -> NotificationStoreResult<()> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        notifications.push(notification.clone());
        Ok(())
    }

    async fn exists_since(
        &self,
        recipient: UserId,
        entity_kind: EntityKind,
        entity_id: Uuid,
        kind: NotificationKind,
        cutoff: DateTime<Utc>,
    ) -> NotificationStoreResult<bool> {
        let notifications = self.notifications.read().map_err(poisoned)?;
        Ok(notifications.iter().any(|notification| {
            notification.recipient() == recipient
                && notification.entity_kind() == entity_kind
                && notification.entity_id() == entity_id
                && notification.kind() == kind
                && notification.created_at() >= cutoff
        }))
    }

    async fn for_recipient(&self, recipient: UserId) -> NotificationStoreResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(poisoned)?;
        let mut matching: Vec<Notification> = notifications
            .iter()
            .filter(|notification| notification.recipient() == recipient)
            .cloned()
            .collect();
        matching.reverse();
        Ok(matching)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        recipient: UserId,
    ) -> NotificationStoreResult<Notification> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        let notification = notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
            .ok_or(NotificationStoreError::NotFound(id))?;
        if notification.recipient() != recipient {
            return Err(NotificationStoreError::NotRecipient(id));
        }
        notification.mark_read();
        Ok(notification.clone())
    }
}
