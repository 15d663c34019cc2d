//! Domain model for the identity context.
//!
//! Holds the crate-wide user identifier, the fixed role order shared by the
//! access-control engine, and the resolved identity value handed to every
//! core operation.

mod error;
mod ids;
mod principal;
mod role;

pub use error::{IdentityError, ParseRoleError};
pub use ids::UserId;
pub use principal::Identity;
pub use role::Role;
