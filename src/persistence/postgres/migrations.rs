//! Schema migrations bundled into the binary.
//!
//! The statements are idempotent (`IF NOT EXISTS`), so applying them on every
//! start-up is safe.

use crate::persistence::RepositoryResult;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// Ordered `(name, up.sql)` pairs.
pub const MIGRATIONS: [(&str, &str); 2] = [
    (
        "2026-10-19-000000_create_tables",
        include_str!("../../../migrations/2026-10-19-000000_create_tables/up.sql"),
    ),
    (
        "2026-10-19-000001_single_active_sprint",
        include_str!("../../../migrations/2026-10-19-000001_single_active_sprint/up.sql"),
    ),
];

/// Applies every migration in order on `connection`.
///
/// # Errors
///
/// Returns the first failing statement as a repository error.
pub fn apply_migrations(connection: &mut PgConnection) -> RepositoryResult<()> {
    for (name, sql) in MIGRATIONS {
        tracing::debug!(migration = name, "applying migration");
        connection.batch_execute(sql)?;
    }
    Ok(())
}
