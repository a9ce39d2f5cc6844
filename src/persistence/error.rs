//! Error type shared by every repository port.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The targeted row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// Identifier that was looked up.
        id: Uuid,
    },

    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// The store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),
}

impl RepositoryError {
    /// Creates a not-found error for the given entity kind.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl AsRef<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: *id.as_ref(),
        }
    }

    /// Creates a unique-violation error for the named constraint.
    #[must_use]
    pub fn unique(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation(constraint.into())
    }

    /// Wraps a database error.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Returns `true` when this error is a violation of `constraint`.
    #[must_use]
    pub fn violates(&self, constraint: &str) -> bool {
        matches!(self, Self::UniqueViolation(name) if name == constraint)
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
            if let Some(name) = info.constraint_name() {
                return Self::unique(name);
            }
        }
        Self::database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::RepositoryError;
    use uuid::Uuid;

    #[test]
    fn violates_matches_only_the_named_constraint() {
        let err = RepositoryError::unique("idx_a");
        assert!(err.violates("idx_a"));
        assert!(!err.violates("idx_b"));
        assert!(!RepositoryError::connection("down").violates("idx_a"));
    }

    #[test]
    fn not_found_reports_entity_and_id() {
        let id = Uuid::new_v4();
        let err = RepositoryError::not_found("sprint", id);
        assert_eq!(err.to_string(), format!("sprint not found: {id}"));
    }
}
