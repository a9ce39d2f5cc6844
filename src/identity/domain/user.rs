//! Account aggregate and its validated fields.

use super::{IdentityDomainError, PasswordHash, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const USERNAME_MIN_CHARS: usize = 3;
const USERNAME_MAX_CHARS: usize = 50;
const EMAIL_MAX_CHARS: usize = 255;

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidUsername`] when the trimmed value
    /// is outside 3-50 characters or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        let is_valid = (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&length)
            && !trimmed.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(IdentityDomainError::InvalidUsername(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] unless the trimmed value
    /// has exactly one `@`, a non-empty local part, and a dotted domain.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let mut parts = trimmed.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && parts.next().is_none()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && trimmed.chars().count() <= EMAIL_MAX_CHARS
            && !trimmed.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted account.
#[derive(Debug, Clone)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted username.
    pub username: Username,
    /// Persisted email.
    pub email: Email,
    /// Persisted password digest.
    pub password_hash: PasswordHash,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new account.
    #[must_use]
    pub fn register(
        username: Username,
        email: Email,
        password_hash: PasswordHash,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: data.created_at,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password digest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `password` matches the stored digest.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash.verify(password)
    }
}
