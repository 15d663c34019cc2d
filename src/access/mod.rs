//! Access-control context for Taskwarden.
//!
//! Resolves a user's effective role against a project by walking the
//! organization → project → team membership hierarchy, and gates operations
//! through the access policy engine (`ensure_access` / `ensure_role`). Role
//! resolution is a pure combination of three lookups under the fixed role
//! order; there is no inheritance between role kinds. The module follows
//! hexagonal architecture:
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
