//! Then steps for dependency gating BDD scenarios.

use super::world::{DependencyGatingWorld, run_async};
use rstest_bdd_macros::then;
use taskwarden::task::domain::TaskStatus;
use taskwarden::task::services::{
    DependencyGraphError, InvalidDependency, TaskLifecycleError,
};

#[then("the transition fails because dependencies are incomplete")]
fn transition_fails_dependencies_incomplete(
    world: &DependencyGatingWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_transition
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::DependenciesIncomplete { .. })
    ) {
        return Err(eyre::eyre!(
            "expected DependenciesIncomplete error, got {result:?}"
        ));
    }
    Ok(())
}

#[then(r#"the status of "{title}" is "{status}""#)]
fn status_of_task_is(
    world: &DependencyGatingWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let member = world.acting_member()?;
    let task_id = world.task_named(&title)?;

    let task = run_async(world.lifecycle.task(member, task_id))?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the link fails because it would create a cycle")]
fn link_fails_with_cycle(world: &DependencyGatingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_link
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing link result"))?;

    if !matches!(
        result,
        Err(DependencyGraphError::Invalid(InvalidDependency::Cycle))
    ) {
        return Err(eyre::eyre!("expected Cycle error, got {result:?}"));
    }
    Ok(())
}
