//! Cross-aggregate workflows against `PostgreSQL`.

use super::helpers::with_database;
use crate::workflows;

#[tokio::test(flavor = "multi_thread")]
async fn single_active_sprint() -> eyre::Result<()> {
    with_database!(workflows::single_active_sprint)
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_starts_leave_one_active() -> eyre::Result<()> {
    with_database!(workflows::racing_starts_leave_one_active)
}

#[tokio::test(flavor = "multi_thread")]
async fn sprint_delete_detaches_stories() -> eyre::Result<()> {
    with_database!(workflows::sprint_delete_detaches_stories)
}

#[tokio::test(flavor = "multi_thread")]
async fn status_change_links_column() -> eyre::Result<()> {
    with_database!(workflows::status_change_links_column)
}

#[tokio::test(flavor = "multi_thread")]
async fn project_delete_cascades() -> eyre::Result<()> {
    with_database!(workflows::project_delete_cascades)
}

#[tokio::test(flavor = "multi_thread")]
async fn version_delete_keeps_stories() -> eyre::Result<()> {
    with_database!(workflows::version_delete_keeps_stories)
}

#[tokio::test(flavor = "multi_thread")]
async fn tokens_persist_as_digests() -> eyre::Result<()> {
    with_database!(workflows::tokens_persist_as_digests)
}
