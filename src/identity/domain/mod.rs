//! Domain model for accounts, password digests and access tokens.

mod error;
mod ids;
mod password;
mod token;
mod user;

pub use error::IdentityDomainError;
pub use ids::UserId;
pub use password::{MAX_PASSWORD_BYTES, MIN_PASSWORD_CHARS, PasswordHash};
pub use token::{AccessToken, StoredToken, TokenDigest};
pub use user::{Email, PersistedUserData, User, Username};

/// Hex-encodes a byte slice in lower case.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
