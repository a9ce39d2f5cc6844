//! Error types for board validation.

use thiserror::Error;

/// Errors returned while constructing board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The column name is empty after trimming.
    #[error("column name must not be empty")]
    EmptyName,

    /// The column name exceeds the maximum length.
    #[error("column name exceeds {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The status key is empty or too long after normalisation.
    #[error("invalid status key '{0}'")]
    InvalidStatusKey(String),
}
