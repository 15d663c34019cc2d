//! End-to-end tests for membership hierarchy resolution and policy gating.

use crate::in_memory::helpers::{Stack, stack_fixture};
use eyre::{bail, ensure};
use rstest::rstest;
use taskwarden::access::{
    domain::{
        MembershipStatus, OrganizationMembership, ProjectMembership, Team, TeamId, TeamMembership,
        TeamRole,
    },
    services::AccessError,
};
use taskwarden::identity::domain::{Role, UserId};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn organization_owner_is_project_admin_everywhere(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;

    let role = stack
        .policy
        .ensure_access(stack.owner, stack.project_id)
        .await?;

    ensure!(role == Role::ProjectAdmin);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_org_admin_outranks_project_assignment(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let user = stack.member(Role::TeamMember)?;
    stack
        .directory
        .insert_org_membership(OrganizationMembership::new(
            stack.org_id,
            user,
            Role::SuperAdmin,
            MembershipStatus::Accepted,
        ))?;

    let role = stack.policy.ensure_access(user, stack.project_id).await?;

    ensure!(role == Role::SuperAdmin);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invited_memberships_grant_nothing(stack_fixture: eyre::Result<Stack>) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let user = UserId::new();
    stack
        .directory
        .insert_project_membership(ProjectMembership::new(
            stack.project_id,
            user,
            Role::ProjectManager,
            MembershipStatus::Invited,
        ))?;

    let result = stack.policy.ensure_access(user, stack.project_id).await;

    match result {
        Err(AccessError::NotAMember { project }) => ensure!(project == stack.project_id),
        other => bail!("expected NotAMember, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leading_a_team_raises_a_client_to_team_lead(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let user = stack.member(Role::Client)?;
    let team_id = TeamId::new();
    stack
        .directory
        .insert_team(Team::new(team_id, stack.project_id, "Platform"))?;
    stack
        .directory
        .insert_team_membership(TeamMembership::new(team_id, user, TeamRole::Lead))?;

    let role = stack.policy.ensure_access(user, stack.project_id).await?;

    ensure!(role == Role::TeamLead, "the most privileged source wins");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_membership_alone_counts_as_project_membership(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let user = UserId::new();
    let team_id = TeamId::new();
    stack
        .directory
        .insert_team(Team::new(team_id, stack.project_id, "Platform"))?;
    stack
        .directory
        .insert_team_membership(TeamMembership::new(team_id, user, TeamRole::Member))?;

    let role = stack.policy.ensure_access(user, stack.project_id).await?;

    ensure!(role == Role::TeamMember);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn allow_list_gating_distinguishes_members_from_managers(
    stack_fixture: eyre::Result<Stack>,
) -> eyre::Result<()> {
    let stack = stack_fixture?;
    let member = stack.member(Role::TeamMember)?;
    let manager = stack.member(Role::ProjectManager)?;

    let refused = stack
        .policy
        .ensure_role(member, stack.project_id, &Role::PRIVILEGED)
        .await;
    match refused {
        Err(AccessError::InsufficientRole { resolved, required }) => {
            ensure!(resolved == Role::TeamMember);
            ensure!(required == Role::PRIVILEGED.to_vec());
        }
        other => bail!("expected InsufficientRole, got {other:?}"),
    }

    let granted = stack
        .policy
        .ensure_role(manager, stack.project_id, &Role::PRIVILEGED)
        .await?;
    ensure!(granted == Role::ProjectManager);
    Ok(())
}
