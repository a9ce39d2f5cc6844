//! Opaque bearer tokens and their persisted digests.

use super::{UserId, to_hex};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Secret bearer credential handed to clients.
///
/// Only its [`TokenDigest`] is ever stored.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Generates a new random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        ))
    }

    /// Wraps a token presented by a client.
    #[must_use]
    pub fn from_presented(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Computes the digest under which the token is stored.
    #[must_use]
    pub fn digest(&self) -> TokenDigest {
        TokenDigest(to_hex(&Sha256::digest(self.0.as_bytes())))
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Hex-encoded SHA-256 digest of an [`AccessToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Wraps a digest loaded from storage.
    #[must_use]
    pub fn from_persisted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the digest as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Persisted token record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    /// Digest of the secret token.
    pub digest: TokenDigest,
    /// Account the token authenticates.
    pub user_id: UserId,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    /// Creates the persisted record for a freshly issued token.
    #[must_use]
    pub fn issue(token: &AccessToken, user_id: UserId, ttl: TimeDelta, clock: &impl Clock) -> Self {
        let issued_at = clock.utc();
        Self {
            digest: token.digest(),
            user_id,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// Returns `true` once `now` has reached the expiry timestamp.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
