//! Task lifecycle management for Taskwarden.
//!
//! Implements the task aggregate, the dependency-gated lifecycle state
//! machine, and the acyclic BLOCKED_BY dependency graph. Status transitions
//! into active states are gated on every blocking task being done, task
//! updates are version-conditional so concurrent writers surface a conflict
//! instead of clobbering each other, and every successful mutation records
//! exactly one activity entry and fans out notifications best-effort. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
