//! Repository port for task persistence and lookup.

use crate::persistence::RepositoryResult;
use crate::story::domain::StoryId;
use crate::task::domain::{Task, TaskId, TaskTitle};
use async_trait::async_trait;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::TASKS_STORY_TITLE`] when the story
    /// already has a task with the same title.
    async fn store_task(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the task
    /// does not exist.
    async fn update_task(&self, task: &Task) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Finds the task of `story_id` titled `title`.
    async fn find_task_by_title(
        &self,
        story_id: StoryId,
        title: &TaskTitle,
    ) -> RepositoryResult<Option<Task>>;

    /// Returns the tasks of a story ordered by creation time.
    async fn list_tasks_for_story(&self, story_id: StoryId) -> RepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the task
    /// does not exist.
    async fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
}
