//! Outcome of effective-role resolution.

use crate::identity::domain::Role;
use serde::{Deserialize, Serialize};

/// Result of resolving a user's effective role against a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum ProjectRoleResolution {
    /// The user holds the given effective role on the project.
    Member {
        /// The single most-privileged role across all membership kinds.
        role: Role,
    },
    /// No membership of any kind links the user to the project.
    NotAMember,
}

impl ProjectRoleResolution {
    /// Returns the effective role, if the user is a member.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Member { role } => Some(*role),
            Self::NotAMember => None,
        }
    }

    /// Returns whether the user has any relationship to the project.
    #[must_use]
    pub const fn is_member(&self) -> bool {
        matches!(self, Self::Member { .. })
    }
}
