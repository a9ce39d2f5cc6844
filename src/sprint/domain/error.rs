//! Error types for sprint validation and lifecycle transitions.

use super::{SprintId, SprintStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by sprint domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The sprint name is empty after trimming.
    #[error("sprint name must not be empty")]
    EmptyName,

    /// The sprint name exceeds the maximum length.
    #[error("sprint name exceeds {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// The end date precedes the start date.
    #[error("sprint end date {end} is before start date {start}")]
    InvalidDateRange {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },

    /// The lifecycle does not allow moving from `from` to `to`.
    #[error("sprint {sprint_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Sprint whose transition was rejected.
        sprint_id: SprintId,
        /// Current status.
        from: SprintStatus,
        /// Requested status.
        to: SprintStatus,
    },
}

/// Error returned while parsing sprint statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);
