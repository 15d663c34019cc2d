//! Membership records across the organization → project → team hierarchy.

use super::{OrganizationId, ParseMembershipStatusError, ParseTeamRoleError, ProjectId, TeamId};
use crate::identity::domain::{Role, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invitation state of a membership record.
///
/// Only accepted memberships contribute to role resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// The user has been invited but has not accepted yet.
    Invited,
    /// The user accepted the invitation.
    Accepted,
}

impl MembershipStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Accepted => "accepted",
        }
    }

    /// Returns whether the membership counts for role resolution.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MembershipStatus {
    type Error = ParseMembershipStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "invited" => Ok(Self::Invited),
            "accepted" => Ok(Self::Accepted),
            _ => Err(ParseMembershipStatusError(value.to_owned())),
        }
    }
}

/// Team-scoped role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Leads the team; upgrades the effective project role to team lead.
    Lead,
    /// Regular team member.
    Member,
}

impl TeamRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TeamRole {
    type Error = ParseTeamRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "lead" => Ok(Self::Lead),
            "member" => Ok(Self::Member),
            _ => Err(ParseTeamRoleError(value.to_owned())),
        }
    }
}

/// Organization-level membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMembership {
    organization_id: OrganizationId,
    user_id: UserId,
    role: Role,
    status: MembershipStatus,
}

impl OrganizationMembership {
    /// Creates an organization membership record.
    #[must_use]
    pub const fn new(
        organization_id: OrganizationId,
        user_id: UserId,
        role: Role,
        status: MembershipStatus,
    ) -> Self {
        Self {
            organization_id,
            user_id,
            role,
            status,
        }
    }

    /// Returns the organization this membership belongs to.
    #[must_use]
    pub const fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the organization-level role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the invitation state.
    #[must_use]
    pub const fn status(&self) -> MembershipStatus {
        self.status
    }

    /// Returns whether this record grants organization-admin authority.
    #[must_use]
    pub const fn grants_org_admin(&self) -> bool {
        self.status.is_accepted() && self.role.is_org_admin()
    }
}

/// Project-level membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
    project_id: ProjectId,
    user_id: UserId,
    role: Role,
    status: MembershipStatus,
}

impl ProjectMembership {
    /// Creates a project membership record.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        user_id: UserId,
        role: Role,
        status: MembershipStatus,
    ) -> Self {
        Self {
            project_id,
            user_id,
            role,
            status,
        }
    }

    /// Returns the project this membership belongs to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the project-level role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the invitation state.
    #[must_use]
    pub const fn status(&self) -> MembershipStatus {
        self.status
    }
}

/// Team-level membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    team_id: TeamId,
    user_id: UserId,
    role: TeamRole,
}

impl TeamMembership {
    /// Creates a team membership record.
    #[must_use]
    pub const fn new(team_id: TeamId, user_id: UserId, role: TeamRole) -> Self {
        Self {
            team_id,
            user_id,
            role,
        }
    }

    /// Returns the team this membership belongs to.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the team-scoped role.
    #[must_use]
    pub const fn role(&self) -> TeamRole {
        self.role
    }
}
