//! Repository port for sprints.

use crate::persistence::RepositoryResult;
use crate::project::domain::ProjectId;
use crate::sprint::domain::{Sprint, SprintId, SprintName};
use async_trait::async_trait;

/// Sprint persistence contract.
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Stores a new sprint.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::SPRINTS_PROJECT_NAME`] for a
    /// duplicate name, or
    /// [`crate::persistence::constraints::SPRINTS_SINGLE_ACTIVE`] when the
    /// sprint is active and the project already has an active sprint.
    async fn store_sprint(&self, sprint: &Sprint) -> RepositoryResult<()>;

    /// Persists name, date and status changes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// sprint does not exist, or the unique violations listed on
    /// [`SprintRepository::store_sprint`].
    async fn update_sprint(&self, sprint: &Sprint) -> RepositoryResult<()>;

    /// Finds a sprint by identifier.
    async fn find_sprint(&self, id: SprintId) -> RepositoryResult<Option<Sprint>>;

    /// Finds the sprint of `project_id` named `name`.
    async fn find_sprint_by_name(
        &self,
        project_id: ProjectId,
        name: &SprintName,
    ) -> RepositoryResult<Option<Sprint>>;

    /// Finds the active sprint of `project_id`, if any.
    async fn find_active_sprint(&self, project_id: ProjectId) -> RepositoryResult<Option<Sprint>>;

    /// Lists the sprints of a project ordered by start date, then name.
    async fn list_sprints_for_project(&self, project_id: ProjectId)
    -> RepositoryResult<Vec<Sprint>>;

    /// Returns every user story of the sprint to the backlog and deletes the
    /// sprint in one atomic step, returning the number of stories detached.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// sprint does not exist.
    async fn delete_sprint_detaching_stories(&self, id: SprintId) -> RepositoryResult<u64>;
}
