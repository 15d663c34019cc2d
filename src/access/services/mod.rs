//! Orchestration services for the access-control context.

mod policy;
mod resolver;

pub use policy::{AccessError, AccessPolicy, AccessResult};
pub use resolver::{MembershipResolver, ResolverError, ResolverResult};
