//! In-memory project member directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::access::domain::ProjectId;
use crate::activity::ports::{
    MemberDirectoryError, MemberDirectoryResult, ProjectMember, ProjectMemberDirectory,
};

/// Thread-safe in-memory member directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberDirectory {
    members: Arc<RwLock<HashMap<ProjectId, Vec<ProjectMember>>>>,
}

fn poisoned(err: impl std::fmt::Display) -> MemberDirectoryError {
    MemberDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryMemberDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member to a project's listing.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDirectoryError::Persistence`] when the backing map is
    /// poisoned.
    pub fn insert_member(
        &self,
        project: ProjectId,
        member: ProjectMember,
    ) -> MemberDirectoryResult<()> {
        let mut members = self.members.write().map_err(poisoned)?;
        members.entry(project).or_default().push(member);
        Ok(())
    }
}

#[async_trait]
impl ProjectMemberDirectory for InMemoryMemberDirectory {
    async fn members_of(&self, project: ProjectId) -> MemberDirectoryResult<Vec<ProjectMember>> {
        let members = self.members.read().map_err(poisoned)?;
        Ok(members.get(&project).cloned().unwrap_or_default())
    }
}
