//! Cross-aggregate workflows against the in-memory store.

use super::helpers::store;
use crate::workflows;
use rstest::rstest;
use sprintboard::persistence::memory::InMemoryStore;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn single_active_sprint(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::single_active_sprint(store).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_starts_leave_one_active(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::racing_starts_leave_one_active(store).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_delete_detaches_stories(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::sprint_delete_detaches_stories(store).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_links_column(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::status_change_links_column(store).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_delete_cascades(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::project_delete_cascades(store).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn version_delete_keeps_stories(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::version_delete_keeps_stories(store).await
}
