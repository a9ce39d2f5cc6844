//! Domain model for user stories.

mod error;
mod fields;
mod ids;
mod story;

pub use error::{DescriptionTooLong, ParsePriorityError, StoryDomainError};
pub use fields::{DESCRIPTION_MAX_CHARS, Description, Priority};
pub use ids::StoryId;
pub use story::{NewUserStory, PersistedStoryData, StoryRevision, StoryTitle, UserStory};
