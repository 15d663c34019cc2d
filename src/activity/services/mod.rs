//! Orchestration services for the activity context.

mod fanout;
mod recorder;

pub use fanout::{NotificationFanOut, NotificationRequest};
pub use recorder::{ActivityRecord, ActivityRecorder};
