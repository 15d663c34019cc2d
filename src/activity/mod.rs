//! Activity and notification fan-out context for Taskwarden.
//!
//! Records an immutable activity entry for every state-changing operation
//! and computes the set of users to notify. Both sides are best-effort: a
//! store failure is logged and never fails the triggering mutation. The
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
