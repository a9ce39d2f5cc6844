//! `PostgreSQL` account and token repositories.

use super::models::{TokenRow, UserRow};
use crate::identity::domain::{
    Email, PasswordHash, PersistedUserData, StoredToken, TokenDigest, User, UserId, Username,
};
use crate::identity::ports::{TokenRepository, UserRepository};
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::{access_tokens, users};
use crate::persistence::{RepositoryError, RepositoryResult, row_count};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[async_trait]
impl UserRepository for PostgresStore {
    async fn store_user(&self, user: &User) -> RepositoryResult<()> {
        let row = to_row(user);
        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn find_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.run_blocking(|connection| {
            users::table
                .order(users::username.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }
}

#[async_trait]
impl TokenRepository for PostgresStore {
    async fn store_token(&self, token: &StoredToken) -> RepositoryResult<()> {
        let row = TokenRow {
            token_digest: token.digest.as_str().to_owned(),
            user_id: token.user_id.into_inner(),
            issued_at: token.issued_at,
            expires_at: token.expires_at,
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(access_tokens::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn find_token(&self, digest: &TokenDigest) -> RepositoryResult<Option<StoredToken>> {
        let lookup = digest.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = access_tokens::table
                .find(lookup)
                .select(TokenRow::as_select())
                .first::<TokenRow>(connection)
                .optional()?;
            Ok(row.map(|token| StoredToken {
                digest: TokenDigest::from_persisted(token.token_digest),
                user_id: UserId::from_uuid(token.user_id),
                issued_at: token.issued_at,
                expires_at: token.expires_at,
            }))
        })
        .await
    }

    async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> RepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(access_tokens::table.filter(access_tokens::expires_at.le(now)))
                    .execute(connection)?;
            row_count(removed)
        })
        .await
    }
}

fn to_row(user: &User) -> UserRow {
    UserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        password_hash: user.password_hash().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> RepositoryResult<User> {
    let data = PersistedUserData {
        id: UserId::from_uuid(row.id),
        username: Username::new(row.username).map_err(RepositoryError::database)?,
        email: Email::new(row.email).map_err(RepositoryError::database)?,
        password_hash: PasswordHash::from_encoded(row.password_hash)
            .map_err(RepositoryError::database)?,
        created_at: row.created_at,
    };
    Ok(User::from_persisted(data))
}
