//! Shared wiring for task context tests.

use std::sync::Arc;

use crate::access::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::{
        MembershipStatus, Organization, OrganizationId, Project, ProjectId, ProjectMembership,
    },
    services::{AccessPolicy, MembershipResolver},
};
use crate::activity::{
    adapters::memory::{InMemoryActivityLog, InMemoryMemberDirectory, InMemoryNotificationStore},
    ports::{ActivityLogStore, NotificationStore, ProjectMemberDirectory},
    services::{ActivityRecorder, NotificationFanOut},
};
use crate::identity::domain::{Role, UserId};
use crate::task::{
    adapters::memory::{InMemoryDependencyRepository, InMemoryTaskRepository},
    domain::{NewTask, Task},
    services::{DependencyGraphService, TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type Lifecycle = TaskLifecycleService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryDependencyRepository,
    DefaultClock,
>;

pub(super) type Graph = DependencyGraphService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryDependencyRepository,
    DefaultClock,
>;

pub(super) struct TaskFixture {
    pub directory: Arc<InMemoryMembershipDirectory>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub edges: Arc<InMemoryDependencyRepository>,
    pub log: Arc<InMemoryActivityLog>,
    pub notifications: Arc<InMemoryNotificationStore>,
    pub members: Arc<InMemoryMemberDirectory>,
    pub lifecycle: Lifecycle,
    pub graph: Graph,
    pub org_id: OrganizationId,
    pub project_id: ProjectId,
}

#[fixture]
pub(super) fn task_fixture() -> eyre::Result<TaskFixture> {
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
        policy,
        Arc::clone(&tasks),
        Arc::clone(&edges),
        recorder,
        Arc::clone(&clock),
    );

    Ok(TaskFixture {
        directory,
        tasks,
        edges,
        log,
        notifications,
        members,
        lifecycle,
        graph,
        org_id,
        project_id,
    })
}

impl TaskFixture {
    /// Adds an accepted project member with the given role.
    pub(super) fn member(&self, role: Role) -> eyre::Result<UserId> {
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

    /// Creates a task through the lifecycle service.
    pub(super) async fn create_task(
        &self,
        creator: UserId,
        title: &str,
    ) -> eyre::Result<Task> {
        let input = NewTask::new(self.project_id, creator, title)?;
        Ok(self.lifecycle.create_task(input).await?)
    }
}
