//! Effective-role resolution across the membership hierarchy.

use crate::access::{
    domain::{OrganizationId, ProjectId, ProjectRoleResolution, TeamRole},
    ports::{DirectoryError, MembershipDirectory},
};
use crate::identity::domain::{Role, UserId};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while resolving a project role.
#[derive(Debug, Clone, Error)]
pub enum ResolverError {
    /// The target project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The project references an organization that does not exist.
    #[error("organization not found: {0}")]
    OrganizationNotFound(OrganizationId),

    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Result type for role resolution.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Resolves a user's effective role against a project.
///
/// The effective role is the most privileged of: the organization role when
/// the user owns the organization or holds an accepted org-admin role, the
/// accepted project membership role, and at least team-lead when the user
/// leads any team attached to the project. The computation is read-only and
/// deterministic.
pub struct MembershipResolver<D>
where
    D: MembershipDirectory,
{
    directory: Arc<D>,
}

impl<D> Clone for MembershipResolver<D>
where
    D: MembershipDirectory,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D> MembershipResolver<D>
where
    D: MembershipDirectory,
{
    /// Creates a resolver over a membership directory.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Resolves the effective project role for a user.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError::ProjectNotFound`] or
    /// [`ResolverError::OrganizationNotFound`] when the hierarchy is broken,
    /// and [`ResolverError::Directory`] on lookup failure.
    pub async fn resolve_project_role(
        &self,
        user: UserId,
        project_id: ProjectId,
    ) -> ResolverResult<ProjectRoleResolution> {
        let project = self
            .directory
            .project(project_id)
            .await?
            .ok_or(ResolverError::ProjectNotFound(project_id))?;
        let organization = self
            .directory
            .organization(project.organization_id())
            .await?
            .ok_or_else(|| ResolverError::OrganizationNotFound(project.organization_id()))?;

        // Organization owners and accepted org admins outrank every
        // project-level assignment.
        if organization.is_owned_by(user) {
            return Ok(ProjectRoleResolution::Member {
                role: Role::ProjectAdmin,
            });
        }
        if let Some(membership) = self
            .directory
            .organization_membership(organization.id(), user)
            .await?
        {
            if membership.grants_org_admin() {
                return Ok(ProjectRoleResolution::Member {
                    role: membership.role(),
                });
            }
        }

        let baseline = self.project_baseline(user, project_id).await?;
        let effective = self.apply_team_roles(user, project_id, baseline).await?;

        Ok(effective.map_or(ProjectRoleResolution::NotAMember, |role| {
            ProjectRoleResolution::Member { role }
        }))
    }

    /// Returns the accepted project membership role, if any.
    async fn project_baseline(
        &self,
        user: UserId,
        project_id: ProjectId,
    ) -> ResolverResult<Option<Role>> {
        let membership = self.directory.project_membership(project_id, user).await?;
        Ok(membership
            .filter(|record| record.status().is_accepted())
            .map(|record| record.role()))
    }

    /// Upgrades the baseline with team memberships on the project's teams.
    ///
    /// Leading any attached team raises the effective role to at least
    /// [`Role::TeamLead`]; plain team membership counts as membership at
    /// [`Role::TeamMember`].
    async fn apply_team_roles(
        &self,
        user: UserId,
        project_id: ProjectId,
        baseline: Option<Role>,
    ) -> ResolverResult<Option<Role>> {
        let mut effective = baseline;
        for team in self.directory.project_teams(project_id).await? {
            let Some(membership) = self.directory.team_membership(team.id(), user).await? else {
                continue;
            };
            let floor = match membership.role() {
                TeamRole::Lead => Role::TeamLead,
                TeamRole::Member => Role::TeamMember,
            };
            effective = Some(effective.map_or(floor, |current| current.max(floor)));
        }
        Ok(effective)
    }
}
