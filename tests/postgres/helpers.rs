//! Shared helpers for `PostgreSQL` integration tests.

use sprintboard::persistence::postgres::{PostgresStore, build_pool};
use std::env;
use std::sync::Arc;

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "SPRINTBOARD_TEST_DATABASE_URL";

/// Connects to the test database and applies migrations.
///
/// Returns `Ok(None)` when [`DATABASE_URL_ENV`] is unset so callers can skip.
///
/// # Errors
///
/// Returns an error if the pool cannot connect or a migration fails.
pub async fn connect() -> eyre::Result<Option<Arc<PostgresStore>>> {
    let Ok(url) = env::var(DATABASE_URL_ENV) else {
        tracing::warn!("{DATABASE_URL_ENV} is unset; skipping PostgreSQL test");
        return Ok(None);
    };
    let store = PostgresStore::new(build_pool(&url, 4)?);
    store.migrate().await?;
    Ok(Some(Arc::new(store)))
}

/// Runs `$workflow` against the test database, or skips when none is configured.
macro_rules! with_database {
    ($workflow:path) => {{
        let Some(store) = $crate::postgres::helpers::connect().await? else {
            return Ok(());
        };
        $workflow(store).await
    }};
}

pub(crate) use with_database;
