//! Identifier types for the story domain.

crate::uuid_identifier!(
    /// Unique identifier for a user story.
    StoryId
);
