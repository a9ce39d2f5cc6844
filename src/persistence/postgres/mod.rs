//! `PostgreSQL` persistence through Diesel.
//!
//! [`PostgresStore`] owns an r2d2 connection pool. Diesel is synchronous, so
//! every repository call is moved onto tokio's blocking pool. Row models and
//! port implementations live in each context's `adapters::postgres` module.

mod migrations;
pub mod schema;

pub use migrations::{MIGRATIONS, apply_migrations};

use crate::persistence::{RepositoryError, RepositoryResult};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`RepositoryError::Connection`] when the pool cannot open its
/// initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> RepositoryResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|err| RepositoryError::connection(err.to_string()))
}

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when a migration statement fails.
    pub async fn migrate(&self) -> RepositoryResult<()> {
        self.run_blocking(apply_migrations).await
    }

    /// Runs `f` with a pooled connection on the blocking thread pool.
    pub(crate) async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| RepositoryError::connection(err.to_string()))?;
            f(&mut connection)
        })
        .await
        .map_err(|err| RepositoryError::connection(format!("task join error: {err}")))?
    }

    /// Runs `f` inside one database transaction.
    ///
    /// The transaction is rolled back when `f` returns an error.
    pub(crate) async fn run_transaction<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking(move |connection| connection.transaction(f))
            .await
    }
}
