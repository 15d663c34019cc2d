//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwarden::access::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::{
        MembershipStatus, Organization, OrganizationId, Project, ProjectId, ProjectMembership,
    },
    services::{AccessPolicy, MembershipResolver},
};
use taskwarden::activity::{
    adapters::memory::{InMemoryActivityLog, InMemoryMemberDirectory, InMemoryNotificationStore},
    ports::{ActivityLogStore, NotificationStore, ProjectMember, ProjectMemberDirectory},
    services::{ActivityRecorder, NotificationFanOut},
};
use taskwarden::identity::domain::{Role, UserId};
use taskwarden::task::{
    adapters::memory::{InMemoryDependencyRepository, InMemoryTaskRepository},
    services::{DependencyGraphService, TaskLifecycleService},
};

/// Lifecycle service type wired over the in-memory adapters.
pub type TestLifecycleService = TaskLifecycleService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryDependencyRepository,
    DefaultClock,
>;

/// Graph service type wired over the in-memory adapters.
pub type TestGraphService = DependencyGraphService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryDependencyRepository,
    DefaultClock,
>;

/// A fully wired in-memory application stack.
pub struct Stack {
    pub directory: Arc<InMemoryMembershipDirectory>,
    pub log: Arc<InMemoryActivityLog>,
    pub notifications: Arc<InMemoryNotificationStore>,
    pub members: Arc<InMemoryMemberDirectory>,
    pub policy: AccessPolicy<InMemoryMembershipDirectory>,
    pub lifecycle: TestLifecycleService,
    pub graph: TestGraphService,
    pub org_id: OrganizationId,
    pub project_id: ProjectId,
    pub owner: UserId,
}

impl Stack {
    /// Adds an accepted project member with the given role.
    pub fn member(&self, role: Role) -> eyre::Result<UserId> {
        let user = UserId::new();
        self.directory
            .insert_project_membership(ProjectMembership::new(
                self.project_id,
                user,
                role,
                MembershipStatus::Accepted,
            ))?;
        Ok(user)
    }

    /// Adds an accepted member and registers their display name for
    /// mention resolution.
    pub fn member_named(&self, role: Role, name: &str) -> eyre::Result<UserId> {
        let user = self.member(role)?;
        self.members
            .insert_member(self.project_id, ProjectMember::new(user, name))?;
        Ok(user)
    }
}

/// Fixture that wires a fresh stack around one organization and project.
#[fixture]
pub fn stack_fixture() -> eyre::Result<Stack> {
    let directory = Arc::new(InMemoryMembershipDirectory::new());
    let owner = UserId::new();
    let org_id = OrganizationId::new();
    let project_id = ProjectId::new();
    directory.insert_organization(Organization::new(org_id, owner, "Acme"))?;
    directory.insert_project(Project::new(project_id, org_id, owner, "Rollout"))?;

    let clock = Arc::new(DefaultClock);
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let edges = Arc::new(InMemoryDependencyRepository::new());
    let log = Arc::new(InMemoryActivityLog::new());
    let notifications = Arc::new(InMemoryNotificationStore::new());
    let members = Arc::new(InMemoryMemberDirectory::new());

    let policy = AccessPolicy::new(MembershipResolver::new(Arc::clone(&directory)));
    let recorder = ActivityRecorder::new(
        Arc::clone(&log) as Arc<dyn ActivityLogStore>,
        Arc::clone(&clock),
    );
    let fanout = NotificationFanOut::new(
        Arc::clone(&notifications) as Arc<dyn NotificationStore>,
        Arc::clone(&members) as Arc<dyn ProjectMemberDirectory>,
        Arc::clone(&clock),
    );
    let lifecycle = TaskLifecycleService::new(
        policy.clone(),
        Arc::clone(&tasks),
        Arc::clone(&edges),
        recorder.clone(),
        fanout,
        Arc::clone(&clock),
    );
    let graph = DependencyGraphService::new(
        policy.clone(),
        Arc::clone(&tasks),
        Arc::clone(&edges),
        recorder,
        Arc::clone(&clock),
    );

    Ok(Stack {
        directory,
        log,
        notifications,
        members,
        policy,
        lifecycle,
        graph,
        org_id,
        project_id,
        owner,
    })
}
