//! Taskwarden: access-control and task-lifecycle core for a multi-tenant
//! project-management system.
//!
//! This crate implements the parts of the system with real invariants:
//! effective-role resolution across the organization → project → team
//! membership hierarchy, dependency-gated task status transitions, and the
//! best-effort activity/notification fan-out that follows every
//! state-changing operation. Page rendering, HTTP binding, authentication
//! token issuance, and the relational store itself are external
//! collaborators reached through ports.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory here)
//! - **Services**: Orchestration over domain and ports
//!
//! # Modules
//!
//! - [`identity`]: Credential resolution and the fixed role order
//! - [`access`]: Membership resolution and the access policy engine
//! - [`task`]: Task lifecycle state machine and the dependency graph
//! - [`activity`]: Activity log recording and notification fan-out

pub mod access;
pub mod activity;
pub mod identity;
pub mod task;
