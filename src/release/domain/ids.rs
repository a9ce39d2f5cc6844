//! Identifier types for the release domain.

crate::uuid_identifier!(
    /// Unique identifier for a version.
    VersionId
);
