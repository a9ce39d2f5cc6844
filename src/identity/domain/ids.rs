//! Identifier types for the identity domain.

crate::uuid_identifier!(
    /// Unique identifier for a registered account.
    UserId
);
