//! Membership directory port: the read side of the membership hierarchy.

use crate::access::domain::{
    Organization, OrganizationId, OrganizationMembership, Project, ProjectId, ProjectMembership,
    Team, TeamId, TeamMembership,
};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Read-only lookups over organizations, projects, teams, and memberships.
///
/// Role resolution needs nothing but these six queries; writes to the
/// hierarchy belong to the excluded CRUD layer.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn project(&self, project: ProjectId) -> DirectoryResult<Option<Project>>;

    /// Finds an organization by identifier.
    ///
    /// Returns `None` when the organization does not exist.
    async fn organization(&self, org: OrganizationId) -> DirectoryResult<Option<Organization>>;

    /// Finds a user's organization membership, if any.
    async fn organization_membership(
        &self,
        org: OrganizationId,
        user: UserId,
    ) -> DirectoryResult<Option<OrganizationMembership>>;

    /// Finds a user's project membership, if any.
    async fn project_membership(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> DirectoryResult<Option<ProjectMembership>>;

    /// Returns every team attached to the project.
    async fn project_teams(&self, project: ProjectId) -> DirectoryResult<Vec<Team>>;

    /// Finds a user's membership on a specific team, if any.
    async fn team_membership(
        &self,
        team: TeamId,
        user: UserId,
    ) -> DirectoryResult<Option<TeamMembership>>;
}

/// Errors returned by membership directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Persistence-layer failure.
    #[error("membership directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
