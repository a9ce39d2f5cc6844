//! Diesel row models for accounts and tokens.

use crate::persistence::postgres::schema::{access_tokens, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for account records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier.
    pub id: uuid::Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Encoded password digest.
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query and insert row for issued tokens.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = access_tokens)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TokenRow {
    /// Hex digest of the secret token.
    pub token_digest: String,
    /// Authenticated account.
    pub user_id: uuid::Uuid,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}
