//! In-memory account and token repositories.

use crate::identity::domain::{Email, StoredToken, TokenDigest, User, UserId, Username};
use crate::identity::ports::{TokenRepository, UserRepository};
use crate::persistence::memory::{InMemoryStore, collect_sorted};
use crate::persistence::row_count;
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn store_user(&self, user: &User) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state
            .users
            .values()
            .any(|existing| existing.username() == user.username())
        {
            return Err(RepositoryError::unique(constraints::USERS_USERNAME));
        }
        if state
            .users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(RepositoryError::unique(constraints::USERS_EMAIL));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.users.values(),
            |_| true,
            |user| user.username().clone(),
        ))
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn store_token(&self, token: &StoredToken) -> RepositoryResult<()> {
        self.write()?
            .tokens
            .insert(token.digest.clone(), token.clone());
        Ok(())
    }

    async fn find_token(&self, digest: &TokenDigest) -> RepositoryResult<Option<StoredToken>> {
        Ok(self.read()?.tokens.get(digest).cloned())
    }

    async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> RepositoryResult<u64> {
        let mut state = self.write()?;
        let before = state.tokens.len();
        state.tokens.retain(|_, token| !token.is_expired_at(now));
        row_count(before.saturating_sub(state.tokens.len()))
    }
}
