//! Repository port for projects and their members.

use crate::board::domain::KanbanColumn;
use crate::identity::domain::UserId;
use crate::persistence::RepositoryResult;
use crate::project::domain::{Project, ProjectId, ProjectName};
use async_trait::async_trait;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project together with its initial board columns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::PROJECTS_OWNER_NAME`] when the owner
    /// already has a project with the same name.
    async fn store_project(
        &self,
        project: &Project,
        initial_columns: &[KanbanColumn],
    ) -> RepositoryResult<()>;

    /// Persists name, description and member changes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// project does not exist.
    async fn update_project(&self, project: &Project) -> RepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;

    /// Finds the project `owner_id` created under `name`.
    async fn find_project_by_owner_and_name(
        &self,
        owner_id: UserId,
        name: &ProjectName,
    ) -> RepositoryResult<Option<Project>>;

    /// Lists the projects `user_id` is a member of, ordered by creation time.
    async fn list_projects_for_member(&self, user_id: UserId) -> RepositoryResult<Vec<Project>>;

    /// Deletes a project with its sprints, versions, columns, stories and
    /// tasks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// project does not exist.
    async fn delete_project_cascade(&self, id: ProjectId) -> RepositoryResult<()>;
}
