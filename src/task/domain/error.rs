//! Error types for task domain validation and parsing.

use crate::story::domain::DescriptionTooLong;
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title exceeds {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The description is too long.
    #[error(transparent)]
    Description(#[from] DescriptionTooLong),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
