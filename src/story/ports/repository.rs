//! Repository port for user stories.

use crate::persistence::RepositoryResult;
use crate::project::domain::ProjectId;
use crate::release::domain::VersionId;
use crate::sprint::domain::SprintId;
use crate::story::domain::{StoryId, StoryTitle, UserStory};
use async_trait::async_trait;

/// User story persistence contract.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Stores a new story with its assignees.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::STORIES_PROJECT_TITLE`] for a
    /// duplicate title.
    async fn store_story(&self, story: &UserStory) -> RepositoryResult<()>;

    /// Persists every field of an existing story, assignees included.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// story does not exist.
    async fn update_story(&self, story: &UserStory) -> RepositoryResult<()>;

    /// Finds a story by identifier.
    async fn find_story(&self, id: StoryId) -> RepositoryResult<Option<UserStory>>;

    /// Finds the story of `project_id` titled `title`.
    async fn find_story_by_title(
        &self,
        project_id: ProjectId,
        title: &StoryTitle,
    ) -> RepositoryResult<Option<UserStory>>;

    /// Lists the stories of a project ordered by creation time.
    async fn list_stories_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<UserStory>>;

    /// Lists the stories of a project that are not planned in any sprint.
    async fn list_backlog_stories(&self, project_id: ProjectId)
    -> RepositoryResult<Vec<UserStory>>;

    /// Lists the stories planned in a sprint.
    async fn list_stories_for_sprint(&self, sprint_id: SprintId)
    -> RepositoryResult<Vec<UserStory>>;

    /// Lists the stories targeted at a version.
    async fn list_stories_for_version(
        &self,
        version_id: VersionId,
    ) -> RepositoryResult<Vec<UserStory>>;

    /// Deletes a story together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// story does not exist.
    async fn delete_story_with_tasks(&self, id: StoryId) -> RepositoryResult<()>;
}
