//! The fixed role enumeration and its total privilege order.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A role in the fixed privilege hierarchy.
///
/// The same enumeration serves as a user's declared global role and as the
/// effective role resolved against a project. Variants are declared in
/// ascending privilege order so the derived [`Ord`] is the authoritative
/// comparison: `Client < TeamMember < TeamLead < ProjectManager <
/// ProjectAdmin < SuperAdmin`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// External client with read-only visibility.
    Client,
    /// Regular contributor on a team.
    TeamMember,
    /// Lead of a team attached to a project.
    TeamLead,
    /// Manages project planning and task flow.
    ProjectManager,
    /// Administers projects and organization-level settings.
    ProjectAdmin,
    /// Unrestricted administrator.
    SuperAdmin,
}

impl Role {
    /// Roles permitted to create and mutate entities within a project.
    pub const WRITERS: [Self; 5] = [
        Self::TeamMember,
        Self::TeamLead,
        Self::ProjectManager,
        Self::ProjectAdmin,
        Self::SuperAdmin,
    ];

    /// Roles that may act on any task regardless of creator or assignment.
    pub const PRIVILEGED: [Self; 3] = [Self::ProjectManager, Self::ProjectAdmin, Self::SuperAdmin];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::TeamMember => "team_member",
            Self::TeamLead => "team_lead",
            Self::ProjectManager => "project_manager",
            Self::ProjectAdmin => "project_admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Returns whether this role may create and mutate project entities.
    #[must_use]
    pub const fn can_write(self) -> bool {
        !matches!(self, Self::Client)
    }

    /// Returns whether this role acts on any task without an ownership link.
    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(
            self,
            Self::ProjectManager | Self::ProjectAdmin | Self::SuperAdmin
        )
    }

    /// Returns whether this role administers an organization and therefore
    /// outranks any project-level assignment.
    #[must_use]
    pub const fn is_org_admin(self) -> bool {
        matches!(self, Self::ProjectAdmin | Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "client" => Ok(Self::Client),
            "team_member" => Ok(Self::TeamMember),
            "team_lead" => Ok(Self::TeamLead),
            "project_manager" => Ok(Self::ProjectManager),
            "project_admin" => Ok(Self::ProjectAdmin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
