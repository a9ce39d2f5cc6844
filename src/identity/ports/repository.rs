//! Repository ports for accounts and issued tokens.

use crate::identity::domain::{Email, StoredToken, TokenDigest, User, UserId, Username};
use crate::persistence::RepositoryResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Account persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a newly registered account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::USERS_USERNAME`] or
    /// [`crate::persistence::constraints::USERS_EMAIL`] when either value is
    /// already registered.
    async fn store_user(&self, user: &User) -> RepositoryResult<()>;

    /// Finds an account by identifier.
    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// Finds an account by username.
    async fn find_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;

    /// Finds an account by email address.
    async fn find_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;

    /// Lists all accounts ordered by username.
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

/// Issued-token persistence contract.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores an issued token record.
    async fn store_token(&self, token: &StoredToken) -> RepositoryResult<()>;

    /// Finds a token record by digest.
    async fn find_token(&self, digest: &TokenDigest) -> RepositoryResult<Option<StoredToken>>;

    /// Deletes every token that expired at or before `now`, returning the
    /// number removed.
    async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> RepositoryResult<u64>;
}
