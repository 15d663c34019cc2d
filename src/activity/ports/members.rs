//! Project member directory port for mention resolution.

use crate::access::domain::ProjectId;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Projection of a project member for name matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// The member's user identifier.
    pub user_id: UserId,
    /// The member's display name.
    pub display_name: String,
}

impl ProjectMember {
    /// Creates a member projection.
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}

/// Result type for member directory operations.
pub type MemberDirectoryResult<T> = Result<T, MemberDirectoryError>;

/// Resolves a project's member list for `@name` mention matching.
#[async_trait]
pub trait ProjectMemberDirectory: Send + Sync {
    /// Returns every member of the project.
    async fn members_of(&self, project: ProjectId) -> MemberDirectoryResult<Vec<ProjectMember>>;
}

/// Errors returned by member directory implementations.
#[derive(Debug, Clone, Error)]
pub enum MemberDirectoryError {
    /// Persistence-layer failure.
    #[error("member directory error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MemberDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
