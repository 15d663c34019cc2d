//! In-memory membership directory for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::{
    domain::{
        Organization, OrganizationId, OrganizationMembership, Project, ProjectId,
        ProjectMembership, Team, TeamId, TeamMembership,
    },
    ports::{DirectoryError, DirectoryResult, MembershipDirectory},
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory membership directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    organizations: HashMap<OrganizationId, Organization>,
    projects: HashMap<ProjectId, Project>,
    org_memberships: HashMap<(OrganizationId, UserId), OrganizationMembership>,
    project_memberships: HashMap<(ProjectId, UserId), ProjectMembership>,
    teams: HashMap<ProjectId, Vec<Team>>,
    team_memberships: HashMap<(TeamId, UserId), TeamMembership>,
}

fn poisoned(err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryMembershipDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an organization record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_organization(&self, organization: Organization) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.organizations.insert(organization.id(), organization);
        Ok(())
    }

    /// Inserts a project record.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_project(&self, project: Project) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.projects.insert(project.id(), project);
        Ok(())
    }

    /// Inserts or replaces an organization membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_org_membership(
        &self,
        membership: OrganizationMembership,
    ) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .org_memberships
            .insert((membership.organization_id(), membership.user_id()), membership);
        Ok(())
    }

    /// Inserts or replaces a project membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_project_membership(&self, membership: ProjectMembership) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .project_memberships
            .insert((membership.project_id(), membership.user_id()), membership);
        Ok(())
    }

    /// Inserts a team attached to its project.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_team(&self, team: Team) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.teams.entry(team.project_id()).or_default().push(team);
        Ok(())
    }

    /// Inserts or replaces a team membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_team_membership(&self, membership: TeamMembership) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .team_memberships
            .insert((membership.team_id(), membership.user_id()), membership);
        Ok(())
    }
}

#[async_trait]
impl MembershipDirectory for InMemoryMembershipDirectory {
    async fn project(&self, project: ProjectId) -> DirectoryResult<Option<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.projects.get(&project).cloned())
    }

    async fn organization(&self, org: OrganizationId) -> DirectoryResult<Option<Organization>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.organizations.get(&org).cloned())
    }

    async fn organization_membership(
        &self,
        org: OrganizationId,
        user: UserId,
    ) -> DirectoryResult<Option<OrganizationMembership>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.org_memberships.get(&(org, user)).copied())
    }

    async fn project_membership(
        &self,
        project: ProjectId,
        user: UserId,
    ) -> DirectoryResult<Option<ProjectMembership>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.project_memberships.get(&(project, user)).copied())
    }

    async fn project_teams(&self, project: ProjectId) -> DirectoryResult<Vec<Team>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.teams.get(&project).cloned().unwrap_or_default())
    }

    async fn team_membership(
        &self,
        team: TeamId,
        user: UserId,
    ) -> DirectoryResult<Option<TeamMembership>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.team_memberships.get(&(team, user)).copied())
    }
}
