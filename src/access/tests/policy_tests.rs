//! Tests for the access policy engine.

use std::sync::Arc;

use crate::access::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::{
        MembershipStatus, Organization, OrganizationId, Project, ProjectId, ProjectMembership,
    },
    services::{AccessError, AccessPolicy, MembershipResolver},
};
use crate::identity::domain::{Role, UserId};
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

struct PolicyFixture {
    directory: Arc<InMemoryMembershipDirectory>,
    policy: AccessPolicy<InMemoryMembershipDirectory>,
    project_id: ProjectId,
}

#[fixture]
fn policy_fixture() -> eyre::Result<PolicyFixture> {
    let directory = Arc::new(InMemoryMembershipDirectory::new());
    let owner = UserId::new();
    let org_id = OrganizationId::new();
    let project_id = ProjectId::new();

    directory.insert_organization(Organization::new(org_id, owner, "Acme"))?;
    directory.insert_project(Project::new(project_id, org_id, owner, "Rollout"))?;

    let policy = AccessPolicy::new(MembershipResolver::new(Arc::clone(&directory)));
    Ok(PolicyFixture {
        directory,
        policy,
        project_id,
    })
}

fn accepted_member(
    fixture: &PolicyFixture,
    role: Role,
) -> eyre::Result<UserId> {
    let user = UserId::new();
    fixture
        .directory
        .insert_project_membership(ProjectMembership::new(
            fixture.project_id,
            user,
            role,
            MembershipStatus::Accepted,
        ))?;
    Ok(user)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_access_returns_effective_role(
    policy_fixture: eyre::Result<PolicyFixture>,
) -> eyre::Result<()> {
    let fixture = policy_fixture?;
    let user = accepted_member(&fixture, Role::TeamMember)?;

    let role = fixture.policy.ensure_access(user, fixture.project_id).await?;

    ensure!(role == Role::TeamMember);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_access_denies_non_members(
    policy_fixture: eyre::Result<PolicyFixture>,
) -> eyre::Result<()> {
    let fixture = policy_fixture?;
    let result = fixture
        .policy
        .ensure_access(UserId::new(), fixture.project_id)
        .await;

    match result {
        Err(err @ AccessError::NotAMember { project }) => {
            ensure!(project == fixture.project_id);
            ensure!(err.kind() == "forbidden");
        }
        other => bail!("expected NotAMember, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_member_fails_admin_allow_list(
    policy_fixture: eyre::Result<PolicyFixture>,
) -> eyre::Result<()> {
    let fixture = policy_fixture?;
    let user = accepted_member(&fixture, Role::TeamMember)?;
    let allowed = [Role::ProjectAdmin, Role::ProjectManager];

    let result = fixture
        .policy
        .ensure_role(user, fixture.project_id, &allowed)
        .await;

    match result {
        Err(AccessError::InsufficientRole { resolved, required }) => {
            ensure!(resolved == Role::TeamMember);
            ensure!(required == allowed.to_vec(), "hint must carry the allow-list");
        }
        other => bail!("expected InsufficientRole, got {other:?}"),
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_role_accepts_listed_roles(
    policy_fixture: eyre::Result<PolicyFixture>,
) -> eyre::Result<()> {
    let fixture = policy_fixture?;
    let user = accepted_member(&fixture, Role::ProjectManager)?;

    let role = fixture
        .policy
        .ensure_role(
            user,
            fixture.project_id,
            &[Role::ProjectAdmin, Role::ProjectManager],
        )
        .await?;

    ensure!(role == Role::ProjectManager);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_not_found(
    policy_fixture: eyre::Result<PolicyFixture>,
) -> eyre::Result<()> {
    let fixture = policy_fixture?;
    let result = fixture
        .policy
        .ensure_access(UserId::new(), ProjectId::new())
        .await;

    match result {
        Err(err @ AccessError::ProjectNotFound(_)) => ensure!(err.kind() == "not_found"),
        other => bail!("expected ProjectNotFound, got {other:?}"),
    }
    Ok(())
}
