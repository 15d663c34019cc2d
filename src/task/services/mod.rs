//! Orchestration services for the task context.

mod graph;
mod lifecycle;
mod support;

pub use graph::{
    DependencyGraphError, DependencyGraphResult, DependencyGraphService, InvalidDependency,
};
pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
