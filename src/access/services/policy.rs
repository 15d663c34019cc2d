//! Access policy engine gating mutations on resolved roles.

use super::{MembershipResolver, ResolverError};
use crate::access::{
    domain::{ProjectId, ProjectRoleResolution},
    ports::{DirectoryError, MembershipDirectory},
};
use crate::identity::domain::{IdentityError, Role, UserId};
use thiserror::Error;

/// Errors returned by policy checks.
///
/// Denials are structured: the variant is the reason and
/// [`AccessError::InsufficientRole`] carries the required-role hint. Callers
/// with no project relationship must not learn whether a target exists, so
/// task-level services translate [`AccessError::NotAMember`] into their own
/// not-found errors before surfacing anything.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// No valid identity was presented upstream.
    #[error("no valid identity")]
    Unauthorized,

    /// The user has no membership of any kind on the project.
    #[error("forbidden: no membership on project {project}")]
    NotAMember {
        /// The project the check ran against.
        project: ProjectId,
    },

    /// The resolved role is not in the operation's allow-list.
    #[error("forbidden: requires one of {required:?}, resolved {resolved}")]
    InsufficientRole {
        /// The effective role that was resolved.
        resolved: Role,
        /// Roles that would have been accepted.
        required: Vec<Role>,
    },

    /// The target project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Membership hierarchy lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AccessError {
    /// Returns the machine-readable error kind for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotAMember { .. } | Self::InsufficientRole { .. } => "forbidden",
            Self::ProjectNotFound(_) => "not_found",
            Self::Directory(_) => "internal",
        }
    }
}

impl From<IdentityError> for AccessError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Unauthorized => Self::Unauthorized,
            IdentityError::Resolver(inner) => Self::Directory(DirectoryError::Persistence(inner)),
        }
    }
}

impl From<ResolverError> for AccessError {
    fn from(err: ResolverError) -> Self {
        match err {
            // A dangling organization reference is a store-integrity
            // problem, not something a caller can act on.
            ResolverError::OrganizationNotFound(org) => Self::Directory(
                DirectoryError::persistence(std::io::Error::other(format!(
                    "project references missing organization {org}"
                ))),
            ),
            ResolverError::ProjectNotFound(project) => Self::ProjectNotFound(project),
            ResolverError::Directory(inner) => Self::Directory(inner),
        }
    }
}

/// Result type for policy checks.
pub type AccessResult<T> = Result<T, AccessError>;

/// Gates operations on resolved effective roles.
///
/// Every mutating operation calls [`AccessPolicy::ensure_access`] at
/// minimum; privileged operations call [`AccessPolicy::ensure_role`] with an
/// explicit allow-list. The per-entity override (task creator or assignee)
/// is layered on top by the task context and never replaces these checks.
pub struct AccessPolicy<D>
where
    D: MembershipDirectory,
{
    resolver: MembershipResolver<D>,
}

impl<D> Clone for AccessPolicy<D>
where
    D: MembershipDirectory,
{
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<D> AccessPolicy<D>
where
    D: MembershipDirectory,
{
    /// Creates a policy engine over a membership resolver.
    #[must_use]
    pub const fn new(resolver: MembershipResolver<D>) -> Self {
        Self { resolver }
    }

    /// Resolves the user's relationship to the project without judging it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or
    /// [`AccessError::Directory`] on lookup failure.
    pub async fn resolve(
        &self,
        user: UserId,
        project: ProjectId,
    ) -> AccessResult<ProjectRoleResolution> {
        Ok(self.resolver.resolve_project_role(user, project).await?)
    }

    /// Requires any membership on the project and returns the effective role.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAMember`] when the user has no membership
    /// of any kind.
    pub async fn ensure_access(&self, user: UserId, project: ProjectId) -> AccessResult<Role> {
        let resolution = self.resolve(user, project).await?;
        resolution
            .role()
            .ok_or(AccessError::NotAMember { project })
    }

    /// Requires the effective role to be in the allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAMember`] for non-members and
    /// [`AccessError::InsufficientRole`] with the allow-list as a hint when
    /// the resolved role is not listed.
    pub async fn ensure_role(
        &self,
        user: UserId,
        project: ProjectId,
        allowed: &[Role],
    ) -> AccessResult<Role> {
        let role = self.ensure_access(user, project).await?;
        if allowed.contains(&role) {
            Ok(role)
        } else {
            Err(AccessError::InsufficientRole {
                resolved: role,
                required: allowed.to_vec(),
            })
        }
    }
}
