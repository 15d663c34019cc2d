//! Notification fan-out with window-based deduplication.

use crate::access::domain::ProjectId;
use crate::activity::{
    domain::{EntityKind, Notification, NotificationKind, mention_tokens},
    ports::{NotificationStore, ProjectMemberDirectory},
};
use crate::identity::domain::UserId;
use chrono::Duration;
use mockable::Clock;
use std::sync::Arc;
use uuid::Uuid;

/// Deduplication window for repeated (recipient, entity, kind) triggers.
const DEDUP_WINDOW_SECS: i64 = 60;

/// Maximum characters of free text echoed into a mention message.
const MENTION_EXCERPT_CHARS: usize = 140;

/// Payload describing one logical notification event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    kind: NotificationKind,
    title: String,
    message: String,
    action_url: Option<String>,
    entity_kind: EntityKind,
    entity_id: Uuid,
}

impl NotificationRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        entity_kind: EntityKind,
        entity_id: Uuid,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            action_url: None,
            entity_kind,
            entity_id,
        }
    }

    /// Sets the deep-link delivered with the notification.
    #[must_use]
    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}

/// Delivers notifications, best-effort and deduplicated.
///
/// Fan-out is fire-and-forget relative to the triggering mutation: store
/// failures are logged per recipient and swallowed, and delivery carries no
/// ordering guarantee beyond "attempted after the state change committed".
pub struct NotificationFanOut<C>
where
    C: Clock + Send + Sync,
{
    store: Arc<dyn NotificationStore>,
    members: Arc<dyn ProjectMemberDirectory>,
    clock: Arc<C>,
}

impl<C> Clone for NotificationFanOut<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            members: Arc::clone(&self.members),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> NotificationFanOut<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a fan-out over a notification store and member directory.
    #[must_use]
    pub const fn new(
        store: Arc<dyn NotificationStore>,
        members: Arc<dyn ProjectMemberDirectory>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            members,
            clock,
        }
    }

    /// Notifies each recipient once per (recipient, entity, kind) window.
    ///
    /// Recipients already notified for the same entity and kind within the
    /// last [`DEDUP_WINDOW_SECS`] seconds are skipped.
    pub async fn notify(&self, recipients: &[UserId], request: &NotificationRequest) {
        let cutoff = self.clock.utc() - Duration::seconds(DEDUP_WINDOW_SECS);
        for &recipient in recipients {
            match self
                .store
                .exists_since(
                    recipient,
                    request.entity_kind,
                    request.entity_id,
                    request.kind,
                    cutoff,
                )
                .await
            {
                Ok(true) => continue,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(error = %err, recipient = %recipient, "dedup lookup failed");
                }
            }

            let mut notification = Notification::new(
                recipient,
                request.kind,
                request.title.clone(),
                request.message.clone(),
                request.entity_kind,
                request.entity_id,
                &*self.clock,
            );
            if let Some(url) = &request.action_url {
                notification = notification.with_action_url(url.clone());
            }
            if let Err(err) = self.store.push(&notification).await {
                tracing::warn!(
                    error = %err,
                    recipient = %recipient,
                    kind = %request.kind,
                    "notification delivery failed; triggering mutation unaffected"
                );
            }
        }
    }

    /// Resolves `@name` mentions in free text and notifies each mentioned
    /// project member, excluding the author.
    ///
    /// Tokens that match no member name (case-insensitive) are silently
    /// ignored.
    pub async fn notify_mentions(
        &self,
        project: ProjectId,
        author: UserId,
        body: &str,
        entity_kind: EntityKind,
        entity_id: Uuid,
    ) {
        let tokens = mention_tokens(body);
        if tokens.is_empty() {
            return;
        }
        let members = match self.members.members_of(project).await {
            Ok(members) => members,
            Err(err) => {
                tracing::warn!(error = %err, project = %project, "member lookup for mentions failed");
                return;
            }
        };

        let mut recipients: Vec<UserId> = Vec::new();
        for token in &tokens {
            for member in &members {
                if member.display_name.eq_ignore_ascii_case(token)
                    && member.user_id != author
                    && !recipients.contains(&member.user_id)
                {
                    recipients.push(member.user_id);
                }
            }
        }
        if recipients.is_empty() {
            return;
        }

        let excerpt: String = body.chars().take(MENTION_EXCERPT_CHARS).collect();
        let request = NotificationRequest::new(
            NotificationKind::Mention,
            "You were mentioned",
            excerpt,
            entity_kind,
            entity_id,
        );
        self.notify(&recipients, &request).await;
    }
}
