//! Service orchestration tests for user stories.

use crate::board::domain::{ColumnId, StatusKey};
use crate::board::ports::ColumnRepository;
use crate::persistence::memory::InMemoryStore;
use crate::project::services::AccessError;
use crate::sprint::domain::SprintId;
use crate::story::domain::{Priority, StoryDomainError};
use crate::story::ports::StoryRepository;
use crate::story::services::{
    CreateStoryRequest, StoryServiceError, UpdateStoryRequest, UserStoryService,
};
use crate::task::ports::TaskRepository;
use crate::task::services::{CreateTaskRequest, TaskService};
use crate::test_support::{Workspace, workspace};
use eyre::{OptionExt, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type TestService = UserStoryService<InMemoryStore, DefaultClock>;

fn service(ws: &Workspace) -> TestService {
    UserStoryService::new(Arc::clone(&ws.store), Arc::clone(&ws.clock))
}

async fn column_for(ws: &Workspace, status: &str) -> eyre::Result<Option<ColumnId>> {
    let key = StatusKey::normalise(status)?;
    Ok(ws
        .store
        .find_column_by_status(ws.project, &key)
        .await?
        .map(|column| column.id()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_to_todo_and_links_default_column() -> eyre::Result<()> {
    let ws = workspace().await?;

    let story = service(&ws)
        .create(CreateStoryRequest::new(ws.project, "Checkout flow"), ws.member)
        .await?;

    ensure!(story.status().as_str() == StatusKey::TODO, "status defaults to TODO");
    ensure!(story.priority() == Priority::Medium, "priority defaults to MEDIUM");
    ensure!(story.sprint_id().is_none(), "new stories start in the backlog");
    ensure!(
        story.column_id() == column_for(&ws, "TODO").await?,
        "story links the TODO column"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_normalises_status_and_keeps_fields() -> eyre::Result<()> {
    let ws = workspace().await?;
    let request = CreateStoryRequest::new(ws.project, "Search")
        .with_description("Full-text search across stories")
        .with_priority(Priority::High)
        .with_status("in progress")
        .with_assignees(["marcus".to_owned(), "olivia".to_owned()]);

    let story = service(&ws).create(request, ws.member).await?;

    ensure!(story.status().as_str() == "IN_PROGRESS", "status normalised");
    ensure!(
        story.column_id() == column_for(&ws, "IN_PROGRESS").await?,
        "linked to the in-progress column"
    );
    ensure!(story.description() == Some("Full-text search across stories"), "description");
    ensure!(story.priority() == Priority::High, "priority");
    ensure!(
        story.assignees().contains(&ws.member) && story.assignees().contains(&ws.owner),
        "both members assigned"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_matching_column_leaves_story_unlinked() -> eyre::Result<()> {
    let ws = workspace().await?;
    let request = CreateStoryRequest::new(ws.project, "Audit").with_status("in review");

    let story = service(&ws).create(request, ws.owner).await?;

    ensure!(story.status().as_str() == "IN_REVIEW", "status kept");
    ensure!(story.column_id().is_none(), "no column for IN_REVIEW");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_title() -> eyre::Result<()> {
    let ws = workspace().await?;
    let stories = service(&ws);
    stories
        .create(CreateStoryRequest::new(ws.project, "Checkout flow"), ws.owner)
        .await?;

    let result = stories
        .create(CreateStoryRequest::new(ws.project, "Checkout flow"), ws.member)
        .await;

    ensure!(
        matches!(result, Err(StoryServiceError::DuplicateTitle { .. })),
        "expected DuplicateTitle, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unknown_and_non_member_assignees() -> eyre::Result<()> {
    let ws = workspace().await?;
    let stories = service(&ws);

    let unknown = stories
        .create(
            CreateStoryRequest::new(ws.project, "A").with_assignees(["nobody".to_owned()]),
            ws.owner,
        )
        .await;
    let outsider = stories
        .create(
            CreateStoryRequest::new(ws.project, "B").with_assignees(["xavier".to_owned()]),
            ws.owner,
        )
        .await;

    ensure!(
        matches!(unknown, Err(StoryServiceError::UnknownUser(ref name)) if name == "nobody"),
        "expected UnknownUser, got {unknown:?}"
    );
    ensure!(
        matches!(
            outsider,
            Err(StoryServiceError::AssigneeNotMember { user_id, .. }) if user_id == ws.outsider
        ),
        "expected AssigneeNotMember, got {outsider:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unknown_sprint() -> eyre::Result<()> {
    let ws = workspace().await?;
    let request = CreateStoryRequest::new(ws.project, "A").with_sprint(SprintId::new());

    let result = service(&ws).create(request, ws.owner).await;

    ensure!(
        matches!(result, Err(StoryServiceError::SprintNotInProject { .. })),
        "expected SprintNotInProject, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_over_long_description() -> eyre::Result<()> {
    let ws = workspace().await?;
    let request = CreateStoryRequest::new(ws.project, "A").with_description("d".repeat(2001));

    let result = service(&ws).create(request, ws.owner).await;

    ensure!(
        matches!(result, Err(StoryServiceError::Domain(StoryDomainError::Description(_)))),
        "expected Description error, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_fields_and_checks_title_against_siblings() -> eyre::Result<()> {
    let ws = workspace().await?;
    let stories = service(&ws);
    let first = stories
        .create(
            CreateStoryRequest::new(ws.project, "First").with_assignees(["marcus".to_owned()]),
            ws.owner,
        )
        .await?;
    stories
        .create(CreateStoryRequest::new(ws.project, "Second"), ws.owner)
        .await?;

    let updated = stories
        .update(
            first.id(),
            UpdateStoryRequest::new("First")
                .with_priority(Priority::Low)
                .with_status("done"),
            ws.member,
        )
        .await?;
    ensure!(updated.priority() == Priority::Low, "priority replaced");
    ensure!(updated.status().as_str() == "DONE", "status replaced");
    ensure!(updated.assignees().is_empty(), "assignees replaced");
    ensure!(updated.column_id() == column_for(&ws, "DONE").await?, "column follows status");

    let clash = stories
        .update(first.id(), UpdateStoryRequest::new("Second"), ws.member)
        .await;
    ensure!(
        matches!(clash, Err(StoryServiceError::DuplicateTitle { .. })),
        "expected DuplicateTitle, got {clash:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_moves_story_between_columns() -> eyre::Result<()> {
    let ws = workspace().await?;
    let stories = service(&ws);
    let story = stories
        .create(CreateStoryRequest::new(ws.project, "Checkout flow"), ws.owner)
        .await?;

    let moved = stories
        .update_status(story.id(), "in-progress", ws.member)
        .await?;

    ensure!(moved.status().as_str() == "IN_PROGRESS", "status moved");
    ensure!(
        moved.column_id() == column_for(&ws, "IN_PROGRESS").await?,
        "column moved"
    );
    let invalid = stories.update_status(story.id(), "  ", ws.member).await;
    ensure!(
        matches!(invalid, Err(StoryServiceError::Status(_))),
        "expected Status error, got {invalid:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_is_owner_only_and_removes_tasks() -> eyre::Result<()> {
    let ws = workspace().await?;
    let stories = service(&ws);
    let tasks = TaskService::new(Arc::clone(&ws.store), Arc::clone(&ws.clock));
    let story = stories
        .create(CreateStoryRequest::new(ws.project, "Checkout flow"), ws.member)
        .await?;
    let task = tasks
        .create(CreateTaskRequest::new(story.id(), "Wire up payment"), ws.member)
        .await?;

    let denied = stories.delete(story.id(), ws.member).await;
    ensure!(
        matches!(denied, Err(StoryServiceError::Access(AccessError::NotOwner { .. }))),
        "expected NotOwner, got {denied:?}"
    );

    stories.delete(story.id(), ws.owner).await?;
    ensure!(ws.store.find_story(story.id()).await?.is_none(), "story deleted");
    ensure!(ws.store.find_task(task.id()).await?.is_none(), "task deleted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_read_stories() -> eyre::Result<()> {
    let ws = workspace().await?;
    let stories = service(&ws);
    let story = stories
        .create(CreateStoryRequest::new(ws.project, "Checkout flow"), ws.member)
        .await?;

    let fetched = stories.get(story.id(), ws.member).await?;
    ensure!(fetched == story, "member reads story");
    let listed = stories.list_for_project(ws.project, ws.owner).await?;
    ensure!(listed.first().ok_or_eyre("story listed")?.id() == story.id(), "listed");

    let denied = stories.get(story.id(), ws.outsider).await;
    ensure!(
        matches!(denied, Err(StoryServiceError::Access(AccessError::NotMember { .. }))),
        "expected NotMember, got {denied:?}"
    );
    Ok(())
}
