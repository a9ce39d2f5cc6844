//! Bcrypt password digests.
//!
//! Digests use the modular crypt format (`$2b$<cost>$<salt><hash>`), so any
//! bcrypt variant produced elsewhere (`$2a$`, `$2y$`) verifies as well.

use super::IdentityDomainError;
use bcrypt::HashParts;

/// Minimum password length in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Bcrypt ignores input past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

const BCRYPT_COST: u32 = if cfg!(test) { 4 } else { 10 };

/// Encoded password digest stored with an account.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Derives a digest for `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::PasswordTooShort`] or
    /// [`IdentityDomainError::PasswordTooLong`] when the password length is
    /// out of range, and [`IdentityDomainError::PasswordHashing`] when bcrypt
    /// fails.
    pub fn derive(password: &str) -> Result<Self, IdentityDomainError> {
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(IdentityDomainError::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(IdentityDomainError::PasswordTooLong {
                max: MAX_PASSWORD_BYTES,
            });
        }
        bcrypt::hash(password, BCRYPT_COST)
            .map(Self)
            .map_err(|err| IdentityDomainError::PasswordHashing(err.to_string()))
    }

    /// Wraps a digest loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::MalformedPasswordHash`] when the value
    /// is not a bcrypt digest.
    pub fn from_encoded(encoded: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let value = encoded.into();
        value
            .parse::<HashParts>()
            .map_err(|_| IdentityDomainError::MalformedPasswordHash)?;
        Ok(Self(value))
    }

    /// Returns `true` when `candidate` matches this digest.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.0).unwrap_or(false)
    }

    /// Spends the same work as [`PasswordHash::verify`] without an account,
    /// so a login for an unknown username costs as much as a wrong password.
    pub fn verify_absent(candidate: &str) {
        let _matched = std::hint::black_box(Self::unknown_account().verify(candidate));
    }

    /// Well-formed digest at the working cost whose salt and hash bytes are
    /// all zero. No password produces it.
    pub(crate) fn unknown_account() -> Self {
        Self(format!("$2b${BCRYPT_COST:02}${}", ".".repeat(53)))
    }

    /// Returns the encoded digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
