//! Given steps for dependency gating BDD scenarios.

use super::world::{DependencyGatingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskwarden::access::domain::{
    MembershipStatus, Organization, OrganizationId, Project, ProjectMembership,
};
use taskwarden::identity::domain::{Role, UserId};
use taskwarden::task::domain::NewTask;

#[given("a project with a team member")]
fn project_with_team_member(world: &mut DependencyGatingWorld) -> Result<(), eyre::Report> {
    let owner = UserId::new();
    let member = UserId::new();
    let org_id = OrganizationId::new();
    world
        .directory
        .insert_organization(Organization::new(org_id, owner, "Acme"))?;
    world
        .directory
        .insert_project(Project::new(world.project_id, org_id, owner, "Rollout"))?;
    world
        .directory
        .insert_project_membership(ProjectMembership::new(
            world.project_id,
            member,
            Role::TeamMember,
            MembershipStatus::Accepted,
        ))?;
    world.member = Some(member);
    Ok(())
}

#[given(r#"a task "{title}""#)]
fn a_task(world: &mut DependencyGatingWorld, title: String) -> Result<(), eyre::Report> {
    let member = world.acting_member()?;
    let task = run_async(
        world
            .lifecycle
            .create_task(NewTask::new(world.project_id, member, title.clone())?),
    )
    .wrap_err("create task in scenario setup")?;
    world.tasks_by_title.insert(title, task.id());
    Ok(())
}

#[given(r#""{child}" is blocked by "{parent}""#)]
fn is_blocked_by(
    world: &mut DependencyGatingWorld,
    child: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let member = world.acting_member()?;
    let parent_id = world.task_named(&parent)?;
    let child_id = world.task_named(&child)?;
    run_async(world.graph.add_dependency(member, parent_id, child_id))
        .wrap_err("link tasks in scenario setup")?;
    Ok(())
}
