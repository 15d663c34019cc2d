//! Port contracts for the access-control context.

mod directory;

pub use directory::{DirectoryError, DirectoryResult, MembershipDirectory};
