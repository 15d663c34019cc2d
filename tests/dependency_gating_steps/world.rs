//! Shared world state for dependency gating BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskwarden::access::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::ProjectId,
    services::{AccessPolicy, MembershipResolver},
};
use taskwarden::activity::{
    adapters::memory::{InMemoryActivityLog, InMemoryMemberDirectory, InMemoryNotificationStore},
    ports::{ActivityLogStore, NotificationStore, ProjectMemberDirectory},
    services::{ActivityRecorder, NotificationFanOut},
};
use taskwarden::identity::domain::UserId;
use taskwarden::task::{
    adapters::memory::{InMemoryDependencyRepository, InMemoryTaskRepository},
    domain::{DependencyEdge, Task, TaskId},
    services::{
        DependencyGraphError, DependencyGraphService, TaskLifecycleError, TaskLifecycleService,
    },
};

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService = TaskLifecycleService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryDependencyRepository,
    DefaultClock,
>;

/// Graph service type used by the BDD world.
pub type TestGraphService = DependencyGraphService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryDependencyRepository,
    DefaultClock,
>;

/// Scenario world for dependency gating behaviour tests.
pub struct DependencyGatingWorld {
    pub directory: Arc<InMemoryMembershipDirectory>,
    pub lifecycle: TestLifecycleService,
    pub graph: TestGraphService,
    pub project_id: ProjectId,
    pub member: Option<UserId>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_transition: Option<Result<Task, TaskLifecycleError>>,
    pub last_link: Option<Result<DependencyEdge, DependencyGraphError>>,
}

impl DependencyGatingWorld {
    /// Creates a world with empty stores and no scenario state.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryMembershipDirectory::new());
        let clock = Arc::new(DefaultClock);
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let edges = Arc::new(InMemoryDependencyRepository::new());
        let policy = AccessPolicy::new(MembershipResolver::new(Arc::clone(&directory)));
        let recorder = ActivityRecorder::new(
            Arc::new(InMemoryActivityLog::new()) as Arc<dyn ActivityLogStore>,
            Arc::clone(&clock),
        );
        let fanout = NotificationFanOut::new(
            Arc::new(InMemoryNotificationStore::new()) as Arc<dyn NotificationStore>,
            Arc::new(InMemoryMemberDirectory::new()) as Arc<dyn ProjectMemberDirectory>,
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

        Self {
            directory,
            lifecycle,
            graph,
            project_id: ProjectId::new(),
            member: None,
            tasks_by_title: HashMap::new(),
            last_transition: None,
            last_link: None,
        }
    }

    /// Returns the scenario's project member.
    pub fn acting_member(&self) -> Result<UserId, eyre::Report> {
        self.member
            .ok_or_else(|| eyre::eyre!("no member registered in scenario world"))
    }

    /// Looks up a task identifier by the title used in the scenario.
    pub fn task_named(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {title:?} in scenario world"))
    }
}

impl Default for DependencyGatingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DependencyGatingWorld {
    DependencyGatingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
