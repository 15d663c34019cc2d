//! Domain types for the task context.

mod change;
mod dependency;
mod error;
mod ids;
mod task;

pub use change::TaskChangeSet;
pub use dependency::DependencyEdge;
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{NewTask, Priority, Task, TaskStatus};
