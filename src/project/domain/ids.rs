//! Identifier types for the project domain.

crate::uuid_identifier!(
    /// Unique identifier for a project.
    ProjectId
);
