//! Repository port for kanban columns.

use crate::board::domain::{ColumnId, KanbanColumn, StatusKey};
use crate::persistence::RepositoryResult;
use crate::project::domain::ProjectId;
use async_trait::async_trait;

/// Kanban column persistence contract.
#[async_trait]
pub trait ColumnRepository: Send + Sync {
    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::COLUMNS_PROJECT_STATUS`] when the
    /// project already has a column with the same status.
    async fn store_column(&self, column: &KanbanColumn) -> RepositoryResult<()>;

    /// Persists name and order changes.
    async fn update_column(&self, column: &KanbanColumn) -> RepositoryResult<()>;

    /// Finds a column by identifier.
    async fn find_column(&self, id: ColumnId) -> RepositoryResult<Option<KanbanColumn>>;

    /// Finds the column of `project_id` keyed by `status`.
    async fn find_column_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> RepositoryResult<Option<KanbanColumn>>;

    /// Lists the columns of a project ordered by position.
    async fn list_columns_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<KanbanColumn>>;

    /// Deletes a column; stories linked to it lose the link.
    async fn delete_column(&self, id: ColumnId) -> RepositoryResult<()>;
}
