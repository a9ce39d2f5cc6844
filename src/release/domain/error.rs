//! Error types for version validation.

use thiserror::Error;

/// Errors returned while constructing version values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseDomainError {
    /// The version title is empty after trimming.
    #[error("version title must not be empty")]
    EmptyTitle,

    /// The version title exceeds the maximum length.
    #[error("version title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The version number is empty, too long, or contains whitespace.
    #[error("invalid version number '{0}'")]
    InvalidNumber(String),
}

/// Error returned while parsing version statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown version status: {0}")]
pub struct ParseVersionStatusError(pub String);
