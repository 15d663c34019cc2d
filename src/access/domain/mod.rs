//! Domain model for membership and access control.
//!
//! Models organizations, projects, teams, and the three membership kinds
//! whose combination yields a user's effective project role.

mod error;
mod ids;
mod membership;
mod org;
mod resolution;

pub use error::{ParseMembershipStatusError, ParseTeamRoleError};
pub use ids::{OrganizationId, ProjectId, TeamId};
pub use membership::{
    MembershipStatus, OrganizationMembership, ProjectMembership, TeamMembership, TeamRole,
};
pub use org::{Organization, Project, Team};
pub use resolution::ProjectRoleResolution;
