//! Port contracts for the activity context.

mod log;
mod members;
mod notification;

pub use log::{ActivityLogError, ActivityLogResult, ActivityLogStore};
pub use members::{MemberDirectoryError, MemberDirectoryResult, ProjectMember, ProjectMemberDirectory};
pub use notification::{NotificationStore, NotificationStoreError, NotificationStoreResult};
