//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty, too short, too long, or contains whitespace.
    #[error("invalid username '{0}', expected 3-50 characters without whitespace")]
    InvalidUsername(String),

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },

    /// The password exceeds what bcrypt can digest.
    #[error("password must be at most {max} bytes")]
    PasswordTooLong {
        /// Maximum accepted length in bytes.
        max: usize,
    },

    /// Bcrypt failed to produce a digest.
    #[error("password hashing failed: {0}")]
    PasswordHashing(String),

    /// A persisted password digest could not be decoded.
    #[error("malformed password digest")]
    MalformedPasswordHash,
}
