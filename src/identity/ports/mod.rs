//! Port contracts for the identity context.

mod credential;

pub use credential::{CredentialResolver, IdentityResult};
