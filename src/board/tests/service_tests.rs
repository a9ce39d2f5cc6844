//! Service orchestration tests for kanban columns.

use crate::board::domain::{KanbanColumn, StatusKey};
use crate::board::ports::ColumnRepository;
use crate::board::services::{
    BoardService, BoardServiceError, CreateColumnRequest, UpdateColumnRequest,
};
use crate::persistence::memory::InMemoryStore;
use crate::project::services::AccessError;
use crate::story::ports::StoryRepository;
use crate::story::services::{CreateStoryRequest, UserStoryService};
use crate::test_support::{Workspace, workspace};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use std::sync::Arc;

type TestService = BoardService<InMemoryStore>;

fn service(ws: &Workspace) -> TestService {
    BoardService::new(Arc::clone(&ws.store))
}

fn statuses(columns: &[KanbanColumn]) -> Vec<String> {
    columns
        .iter()
        .map(|column| column.status().to_string())
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_projects_start_with_default_board() -> eyre::Result<()> {
    let ws = workspace().await?;

    let columns = service(&ws).list_for_project(ws.project, ws.member).await?;

    ensure!(
        statuses(&columns) == ["TODO", "IN_PROGRESS", "DONE"],
        "unexpected board: {columns:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initialize_defaults_restores_only_missing_columns() -> eyre::Result<()> {
    let ws = workspace().await?;
    let board = service(&ws);
    let done = ws
        .store
        .find_column_by_status(ws.project, &StatusKey::normalise("done")?)
        .await?
        .ok_or_eyre("default DONE column")?;
    ws.store.delete_column(done.id()).await?;

    let columns = board.initialize_defaults(ws.project).await?;

    ensure!(
        statuses(&columns) == ["TODO", "IN_PROGRESS", "DONE"],
        "unexpected board: {columns:?}"
    );
    let again = board.initialize_defaults(ws.project).await?;
    ensure!(again.len() == 3, "initialising twice adds nothing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_appends_custom_column_with_normalised_status() -> eyre::Result<()> {
    let ws = workspace().await?;
    let board = service(&ws);

    let column = board
        .create(
            CreateColumnRequest::new(ws.project, "In review", "in review"),
            ws.member,
        )
        .await?;

    ensure!(column.status().as_str() == "IN_REVIEW", "status normalised");
    ensure!(column.order() == 4, "appended after the defaults");
    ensure!(!column.is_default(), "custom columns are not defaults");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_status() -> eyre::Result<()> {
    let ws = workspace().await?;

    let result = service(&ws)
        .create(CreateColumnRequest::new(ws.project, "Doing", "In Progress"), ws.owner)
        .await;

    ensure!(
        matches!(result, Err(BoardServiceError::DuplicateStatus { ref status, .. }) if status.as_str() == "IN_PROGRESS"),
        "expected DuplicateStatus, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_status_and_default_order() -> eyre::Result<()> {
    let ws = workspace().await?;
    let board = service(&ws);
    let columns = board.list_for_project(ws.project, ws.owner).await?;
    let todo = columns.first().ok_or_eyre("default TODO column")?;
    let custom = board
        .create(
            CreateColumnRequest::new(ws.project, "Review", "review").with_order(7),
            ws.owner,
        )
        .await?;

    let renamed = board
        .update(todo.id(), UpdateColumnRequest::new("Backlog").with_order(5), ws.member)
        .await?;
    let moved = board
        .update(custom.id(), UpdateColumnRequest::new("Peer review").with_order(2), ws.member)
        .await?;

    ensure!(renamed.name().as_str() == "Backlog", "default column renamed");
    ensure!(renamed.order() == 1, "default column order fixed");
    ensure!(renamed.status().as_str() == "TODO", "status unchanged");
    ensure!(moved.order() == 2, "custom column moved");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_protects_defaults_and_unlinks_stories() -> eyre::Result<()> {
    let ws = workspace().await?;
    let board = service(&ws);
    let stories = UserStoryService::new(Arc::clone(&ws.store), Arc::clone(&ws.clock));
    let columns = board.list_for_project(ws.project, ws.owner).await?;
    let todo = columns.first().ok_or_eyre("default TODO column")?;
    let review = board
        .create(CreateColumnRequest::new(ws.project, "Review", "review"), ws.owner)
        .await?;
    let story = stories
        .create(
            CreateStoryRequest::new(ws.project, "Checkout flow").with_status("review"),
            ws.owner,
        )
        .await?;
    ensure!(story.column_id() == Some(review.id()), "story linked to review");

    let protected = board.delete(todo.id(), ws.owner).await;
    ensure!(
        matches!(protected, Err(BoardServiceError::DefaultColumnProtected(id)) if id == todo.id()),
        "expected DefaultColumnProtected, got {protected:?}"
    );

    board.delete(review.id(), ws.member).await?;
    let reloaded = ws
        .store
        .find_story(story.id())
        .await?
        .ok_or_eyre("story survives column deletion")?;
    ensure!(reloaded.column_id().is_none(), "story unlinked");
    ensure!(reloaded.status().as_str() == "REVIEW", "status kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_touch_the_board() -> eyre::Result<()> {
    let ws = workspace().await?;

    let result = service(&ws)
        .create(CreateColumnRequest::new(ws.project, "QA", "qa"), ws.outsider)
        .await;

    ensure!(
        matches!(result, Err(BoardServiceError::Access(AccessError::NotMember { .. }))),
        "expected NotMember, got {result:?}"
    );
    Ok(())
}
