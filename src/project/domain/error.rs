//! Error types for project validation.

use thiserror::Error;

/// Errors returned while constructing project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project name exceeds the maximum length.
    #[error("project name exceeds {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
}
