//! Application services for user stories.

mod stories;

pub use stories::{
    CreateStoryRequest, StoryServiceError, StoryServiceResult, UpdateStoryRequest,
    UserStoryService,
};
