//! In-memory adapters for activity ports.

mod log;
mod members;
mod notification;

pub use log::InMemoryActivityLog;
pub use members::InMemoryMemberDirectory;
pub use notification::InMemoryNotificationStore;
