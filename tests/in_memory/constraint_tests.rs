//! Uniqueness rules enforced by the in-memory store.

use super::helpers::store;
use crate::workflows;
use rstest::rstest;
use sprintboard::persistence::memory::InMemoryStore;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_active_sprint_is_refused(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::store_rejects_second_active_sprint(store).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_refused(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::store_rejects_duplicate_username(store).await
}
