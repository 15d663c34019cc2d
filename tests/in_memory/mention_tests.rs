//! End-to-end tests for comment mentions and notification delivery.

use crate::in_memory::helpers::{Stack, stack_fixture};
use eyre::{bail, ensure};
use rstest::rstest;
use taskwarden::activity::domain::{ActivityAction, NotificationKind};
use taskwarden::activity::ports::{ActivityLogStore, NotificationStore};
use taskwarden::identity::domain::Role;
use taskwarden::task::domain::NewTask;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commenting_with_a_mention_notifies_the_named_member(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let author = stack.member_named(Role::TeamMember, "Bob")?;
    let alice = stack.member_named(Role::TeamMember, "Alice")?;
    let task = stack
        .lifecycle
        .create_task(NewTask::new(stack.project_id, author, "Release notes")?)
        .await?;

    stack
        .lifecycle
        .comment_on_task(author, task.id(), "please review @Alice before Friday")
        .await?;

    let inbox = stack.notifications.for_recipient(alice).await?;
    ensure!(inbox.len() == 1);
    let Some(notification) = inbox.first() else {
        bail!("notification missing");
    };
    ensure!(notification.kind() == NotificationKind::Mention);
    ensure!(notification.entity_id() == task.id().into_inner());
    ensure!(!notification.is_read());

    // The recipient can acknowledge it.
    let read = stack
        .notifications
        .mark_read(notification.id(), alice)
        .await?;
    ensure!(read.is_read());

    // The comment itself is on the activity log.
    let comments = stack
        .log
        .entries_for_entity(
            taskwarden::activity::domain::EntityKind::Task,
            task.id().into_inner(),
        )
        .await?
        .into_iter()
        .filter(|entry| entry.action() == ActivityAction::Commented)
        .count();
    ensure!(comments == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_names_and_self_mentions_deliver_nothing(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let author = stack.member_named(Role::TeamMember, "Bob")?;
    let task = stack
        .lifecycle
        .create_task(NewTask::new(stack.project_id, author, "Quiet task")?)
        .await?;

    stack
        .lifecycle
        .comment_on_task(author, task.id(), "note to @Bob, cc @nobody")
        .await?;

    ensure!(stack.notifications.all_notifications()?.is_empty());
    Ok(())
}
