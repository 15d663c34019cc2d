//! Domain model for activity logging and notifications.

mod entry;
mod error;
mod ids;
mod mention;
mod notification;

pub use entry::{ActivityAction, ActivityLogEntry, EntityKind};
pub use error::{ParseActivityActionError, ParseNotificationKindError};
pub use ids::{ActivityEntryId, NotificationId};
pub use mention::mention_tokens;
pub use notification::{Notification, NotificationKind};
