//! In-memory adapters for access-control ports.

mod directory;

pub use directory::InMemoryMembershipDirectory;
