//! Token persistence through the in-memory store.

use super::helpers::store;
use crate::workflows;
use rstest::rstest;
use sprintboard::persistence::memory::InMemoryStore;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tokens_persist_as_digests(store: Arc<InMemoryStore>) -> eyre::Result<()> {
    workflows::tokens_persist_as_digests(store).await
}
