//! Identifier types for the task domain.

crate::uuid_identifier!(
    /// Unique identifier for a task.
    TaskId
);
