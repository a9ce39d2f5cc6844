//! Identifier types for the sprint domain.

crate::uuid_identifier!(
    /// Unique identifier for a sprint.
    SprintId
);
