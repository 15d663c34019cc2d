//! Error types for parsing access-control values from persistence.

use thiserror::Error;

/// Error returned while parsing membership statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown membership status: {0}")]
pub struct ParseMembershipStatusError(pub String);

/// Error returned while parsing team roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown team role: {0}")]
pub struct ParseTeamRoleError(pub String);
