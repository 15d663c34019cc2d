//! In-memory adapters for identity ports.

mod credential;

pub use credential::StaticTokenResolver;
