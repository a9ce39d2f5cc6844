//! Storage adapters shared by every bounded context.
//!
//! Each context declares its own repository port; both stores below implement
//! all of them so that operations spanning several aggregates (detaching
//! stories from a deleted sprint, cascading a project delete) stay atomic.
//!
//! - [`memory::InMemoryStore`]: lock-protected maps for tests and demos
//! - [`postgres::PostgresStore`]: Diesel-backed `PostgreSQL` persistence

pub mod constraints;
mod error;
pub mod memory;
pub mod postgres;

pub use error::{RepositoryError, RepositoryResult};

use crate::board::ports::ColumnRepository;
use crate::identity::ports::{TokenRepository, UserRepository};
use crate::project::ports::ProjectRepository;
use crate::release::ports::VersionRepository;
use crate::sprint::ports::SprintRepository;
use crate::story::ports::StoryRepository;
use crate::task::ports::TaskRepository;

/// A backing store implementing every repository port.
///
/// Blanket-implemented, so both [`memory::InMemoryStore`] and
/// [`postgres::PostgresStore`] qualify and the HTTP layer can be generic over
/// one type parameter.
pub trait Store:
    UserRepository
    + TokenRepository
    + ProjectRepository
    + SprintRepository
    + StoryRepository
    + TaskRepository
    + ColumnRepository
    + VersionRepository
    + 'static
{
}

impl<T> Store for T where
    T: UserRepository
        + TokenRepository
        + ProjectRepository
        + SprintRepository
        + StoryRepository
        + TaskRepository
        + ColumnRepository
        + VersionRepository
        + 'static
{
}

/// Converts an affected-row count into the `u64` reported by the ports.
pub(crate) fn row_count(count: usize) -> RepositoryResult<u64> {
    u64::try_from(count).map_err(RepositoryError::database)
}
