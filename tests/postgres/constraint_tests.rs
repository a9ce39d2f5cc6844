//! Unique indexes enforced by the `PostgreSQL` schema.

use super::helpers::with_database;
use crate::workflows;

#[tokio::test(flavor = "multi_thread")]
async fn second_active_sprint_violates_partial_index() -> eyre::Result<()> {
    with_database!(workflows::store_rejects_second_active_sprint)
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_violates_unique_key() -> eyre::Result<()> {
    with_database!(workflows::store_rejects_duplicate_username)
}
