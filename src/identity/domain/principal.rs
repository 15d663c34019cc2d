//! Resolved caller identity.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// The identity a credential resolves to: a stable user identifier plus the
/// role declared on the account.
///
/// The declared role is *not* the effective role for any particular project;
/// that is computed by the access context against the membership hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: UserId,
    declared_role: Role,
}

impl Identity {
    /// Creates an identity from a user identifier and declared role.
    #[must_use]
    pub const fn new(user_id: UserId, declared_role: Role) -> Self {
        Self {
            user_id,
            declared_role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the role declared on the account.
    #[must_use]
    pub const fn declared_role(&self) -> Role {
        self.declared_role
    }
}
