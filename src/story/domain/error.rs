//! Error types for user story validation.

use thiserror::Error;

/// A description exceeded the accepted length.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("description has {actual} characters, at most {max} are allowed")]
pub struct DescriptionTooLong {
    /// Maximum accepted length.
    pub max: usize,
    /// Submitted length.
    pub actual: usize,
}

/// Errors returned while constructing user story values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoryDomainError {
    /// The title is empty after trimming.
    #[error("user story title must not be empty")]
    EmptyTitle,

    /// The title exceeds the maximum length.
    #[error("user story title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The description is too long.
    #[error(transparent)]
    Description(#[from] DescriptionTooLong),
}

/// Error returned while parsing priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
