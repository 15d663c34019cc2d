//! End-to-end tests for the dependency-gated task lifecycle.

use crate::in_memory::helpers::{Stack, stack_fixture};
use eyre::{bail, ensure};
use rstest::rstest;
use taskwarden::activity::domain::{ActivityAction, NotificationKind};
use taskwarden::identity::domain::Role;
use taskwarden::task::{
    domain::{NewTask, TaskChangeSet, TaskStatus},
    services::TaskLifecycleError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn gated_task_completes_once_its_blocker_is_done(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let lead = stack.member(Role::TeamLead)?;
    let dev = stack.member(Role::TeamMember)?;

    let blocker = stack
        .lifecycle
        .create_task(
            NewTask::new(stack.project_id, lead, "Design review")?.with_assignees(vec![lead]),
        )
        .await?;
    let gated = stack
        .lifecycle
        .create_task(
            NewTask::new(stack.project_id, lead, "Implementation")?
                .with_assignees(vec![dev])
                .with_watchers(vec![lead]),
        )
        .await?;
    stack
        .graph
        .add_dependency(lead, blocker.id(), gated.id())
        .await?;

    // The assignee cannot start the gated task yet.
    let refused = stack
        .lifecycle
        .transition_task(
            dev,
            gated.id(),
            &TaskChangeSet::new().with_status(TaskStatus::InProgress),
        )
        .await;
    ensure!(matches!(
        refused,
        Err(TaskLifecycleError::DependenciesIncomplete { .. })
    ));

    // Finishing the blocker opens the gate.
    stack
        .lifecycle
        .transition_task(
            lead,
            blocker.id(),
            &TaskChangeSet::new().with_status(TaskStatus::Done),
        )
        .await?;
    let started = stack
        .lifecycle
        .transition_task(
            dev,
            gated.id(),
            &TaskChangeSet::new().with_status(TaskStatus::InProgress),
        )
        .await?;
    ensure!(started.status() == TaskStatus::InProgress);
    ensure!(started.version() == 2);

    // The watching lead hears about the start; the acting dev does not.
    let update_notifications: Vec<_> = stack
        .notifications
        .all_notifications()?
        .into_iter()
        .filter(|n| n.kind() == NotificationKind::TaskUpdated)
        .collect();
    ensure!(update_notifications.iter().any(|n| n.recipient() == lead));
    ensure!(update_notifications.iter().all(|n| n.recipient() != dev));

    // Every successful mutation left exactly one activity entry.
    let entries = stack.log.all_entries()?;
    let status_changes = entries
        .iter()
        .filter(|entry| entry.action() == ActivityAction::StatusChanged)
        .count();
    ensure!(status_changes == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_and_clients_are_kept_out(stack_fixture: eyre::Result<Stack>) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let creator = stack.member(Role::TeamMember)?;
    let client = stack.member(Role::Client)?;
    let task = stack
        .lifecycle
        .create_task(NewTask::new(stack.project_id, creator, "Internal work")?)
        .await?;

    // A client sees the task but may not move it.
    let seen = stack.lifecycle.task(client, task.id()).await?;
    ensure!(seen.id() == task.id());
    let refused = stack
        .lifecycle
        .transition_task(
            client,
            task.id(),
            &TaskChangeSet::new().with_status(TaskStatus::Done),
        )
        .await;
    match refused {
        Err(err @ TaskLifecycleError::NotTaskActor(_)) => {
            ensure!(err.kind() == "forbidden");
        }
        other => bail!("expected NotTaskActor, got {other:?}"),
    }

    // An outsider cannot even observe that the task exists.
    let masked = stack
        .lifecycle
        .task(taskwarden::identity::domain::UserId::new(), task.id())
        .await;
    match masked {
        Err(err @ TaskLifecycleError::NotFound(_)) => {
            ensure!(err.kind() == "not_found");
        }
        other => bail!("expected NotFound, got {other:?}"),
    }
    Ok(())
}
