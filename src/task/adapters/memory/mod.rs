//! In-memory adapters for tests and local wiring.

mod dependency;
mod task;

pub use dependency::InMemoryDependencyRepository;
pub use task::InMemoryTaskRepository;
