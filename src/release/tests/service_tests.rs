//! Service orchestration tests for versions.

use crate::persistence::memory::InMemoryStore;
use crate::project::services::AccessError;
use crate::release::domain::VersionStatus;
use crate::release::ports::VersionRepository;
use crate::release::services::{ReleaseService, ReleaseServiceError, VersionRequest};
use crate::story::domain::UserStory;
use crate::story::ports::StoryRepository;
use crate::story::services::{CreateStoryRequest, UserStoryService};
use crate::test_support::{Workspace, date, workspace};
use eyre::{OptionExt, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type TestService = ReleaseService<InMemoryStore, DefaultClock>;

fn service(ws: &Workspace) -> TestService {
    ReleaseService::new(Arc::clone(&ws.store), Arc::clone(&ws.clock))
}

async fn story(ws: &Workspace, title: &str) -> eyre::Result<UserStory> {
    let stories = UserStoryService::new(Arc::clone(&ws.store), Arc::clone(&ws.clock));
    Ok(stories
        .create(CreateStoryRequest::new(ws.project, title), ws.owner)
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_list_newest_first() -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    let first = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.member)
        .await?;
    let second = releases
        .create(
            ws.project,
            VersionRequest::new("Beta", "0.2.0")
                .with_description("Feature complete")
                .with_release_date(date(2026, 5, 1)?),
            ws.member,
        )
        .await?;

    ensure!(first.status() == VersionStatus::Planned, "new versions are planned");
    let listed = releases.list_for_project(ws.project, ws.owner).await?;
    let numbers: Vec<&str> = listed.iter().map(|v| v.number().as_str()).collect();
    ensure!(numbers == ["0.2.0", "0.1.0"], "newest first: {numbers:?}");
    ensure!(releases.get(second.id(), ws.owner).await? == second, "readable");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_number_and_title() -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.owner)
        .await?;

    let same_number = releases
        .create(ws.project, VersionRequest::new("Other", "0.1.0"), ws.owner)
        .await;
    let same_title = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.1"), ws.owner)
        .await;

    ensure!(
        matches!(same_number, Err(ReleaseServiceError::DuplicateVersionNumber { .. })),
        "expected DuplicateVersionNumber, got {same_number:?}"
    );
    ensure!(
        matches!(same_title, Err(ReleaseServiceError::DuplicateTitle { .. })),
        "expected DuplicateTitle, got {same_title:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_allows_own_number_and_rejects_taken_number() -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    let first = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.owner)
        .await?;
    releases
        .create(ws.project, VersionRequest::new("Beta", "0.2.0"), ws.owner)
        .await?;

    let renamed = releases
        .update(first.id(), VersionRequest::new("Alpha", "0.1.0"), ws.member)
        .await?;
    ensure!(renamed.title().as_str() == "Alpha", "title replaced");

    let clash = releases
        .update(first.id(), VersionRequest::new("Alpha", "0.2.0"), ws.member)
        .await;
    ensure!(
        matches!(clash, Err(ReleaseServiceError::DuplicateVersionNumber { .. })),
        "expected DuplicateVersionNumber, got {clash:?}"
    );
    Ok(())
}

#[rstest]
#[case(VersionStatus::InProgress)]
#[case(VersionStatus::Released)]
#[case(VersionStatus::Archived)]
#[case(VersionStatus::Planned)]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_accepts_any_status(#[case] status: VersionStatus) -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    let version = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.owner)
        .await?;

    let updated = releases.update_status(version.id(), status, ws.member).await?;

    ensure!(updated.status() == status, "status set");
    ensure!(
        updated.release_date().is_some() == (status == VersionStatus::Released),
        "only releasing stamps a date"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stories_can_be_targeted_and_released_from_version() -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    let version = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.owner)
        .await?;
    let item = story(&ws, "Checkout flow").await?;

    let targeted = releases.assign_story(version.id(), item.id(), ws.member).await?;
    ensure!(targeted.version_id() == Some(version.id()), "story targeted");
    let listed = releases.stories_in_version(version.id(), ws.member).await?;
    ensure!(listed.len() == 1, "version lists story");

    let removed = releases.remove_story(version.id(), item.id(), ws.member).await?;
    ensure!(removed.version_id().is_none(), "target cleared");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_detaches_stories() -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    let version = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.owner)
        .await?;
    let item = story(&ws, "Checkout flow").await?;
    releases.assign_story(version.id(), item.id(), ws.owner).await?;

    releases.delete(version.id(), ws.member).await?;

    ensure!(ws.store.find_version(version.id()).await?.is_none(), "version gone");
    let reloaded = ws
        .store
        .find_story(item.id())
        .await?
        .ok_or_eyre("story survives version deletion")?;
    ensure!(reloaded.version_id().is_none(), "story detached");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn version_operations_require_membership() -> eyre::Result<()> {
    let ws = workspace().await?;
    let releases = service(&ws);
    let version = releases
        .create(ws.project, VersionRequest::new("First cut", "0.1.0"), ws.owner)
        .await?;

    let create = releases
        .create(ws.project, VersionRequest::new("Sneaky", "9.9.9"), ws.outsider)
        .await;
    let status = releases
        .update_status(version.id(), VersionStatus::Archived, ws.outsider)
        .await;

    ensure!(
        matches!(create, Err(ReleaseServiceError::Access(AccessError::NotMember { .. }))),
        "expected NotMember, got {create:?}"
    );
    ensure!(
        matches!(status, Err(ReleaseServiceError::Access(AccessError::NotMember { .. }))),
        "expected NotMember, got {status:?}"
    );
    Ok(())
}
