//! When steps for dependency gating BDD scenarios.

use super::world::{DependencyGatingWorld, run_async};
use rstest_bdd_macros::when;
use taskwarden::task::domain::{TaskChangeSet, TaskStatus};

#[when(r#"the member moves "{title}" to "{status}""#)]
fn member_moves_task(
    world: &mut DependencyGatingWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let member = world.acting_member()?;
    let task_id = world.task_named(&title)?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;

    let result = run_async(world.lifecycle.transition_task(
        member,
        task_id,
        &TaskChangeSet::new().with_status(target),
    ));
    world.last_transition = Some(result);
    Ok(())
}

#[when(r#"the member links "{child}" as blocked by "{parent}""#)]
fn member_links_tasks(
    world: &mut DependencyGatingWorld,
    child: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let member = world.acting_member()?;
    let parent_id = world.task_named(&parent)?;
    let child_id = world.task_named(&child)?;

    let result = run_async(world.graph.add_dependency(member, parent_id, child_id));
    world.last_link = Some(result);
    Ok(())
}
