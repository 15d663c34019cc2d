//! Port contracts for the task context.

mod dependency;
mod repository;

pub use dependency::{DependencyRepository, DependencyRepositoryError, DependencyRepositoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
