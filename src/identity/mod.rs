//! Identity context for Taskwarden.
//!
//! Resolves "who is making this call" from an inbound credential into a
//! stable user identifier and a declared global role. Every core function in
//! the other contexts takes the resulting identity explicitly; there is no
//! ambient current-user state anywhere in the crate. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
