//! In-memory kanban column repository.

use crate::board::domain::{ColumnId, KanbanColumn, StatusKey};
use crate::board::ports::ColumnRepository;
use crate::persistence::memory::{InMemoryStore, collect_sorted};
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use crate::project::domain::ProjectId;
use async_trait::async_trait;

#[async_trait]
impl ColumnRepository for InMemoryStore {
    async fn store_column(&self, column: &KanbanColumn) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let status_taken = state.columns.values().any(|existing| {
            existing.project_id() == column.project_id() && existing.status() == column.status()
        });
        if status_taken {
            return Err(RepositoryError::unique(constraints::COLUMNS_PROJECT_STATUS));
        }
        state.columns.insert(column.id(), column.clone());
        Ok(())
    }

    async fn update_column(&self, column: &KanbanColumn) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let slot = state
            .columns
            .get_mut(&column.id())
            .ok_or_else(|| RepositoryError::not_found("kanban column", column.id()))?;
        *slot = column.clone();
        Ok(())
    }

    async fn find_column(&self, id: ColumnId) -> RepositoryResult<Option<KanbanColumn>> {
        Ok(self.read()?.columns.get(&id).cloned())
    }

    async fn find_column_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> RepositoryResult<Option<KanbanColumn>> {
        let state = self.read()?;
        Ok(state
            .columns
            .values()
            .find(|column| column.project_id() == project_id && column.status() == status)
            .cloned())
    }

    async fn list_columns_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<KanbanColumn>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.columns.values(),
            |column| column.project_id() == project_id,
            |column| (column.order(), column.name().as_str().to_owned()),
        ))
    }

    async fn delete_column(&self, id: ColumnId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.columns.remove(&id).is_none() {
            return Err(RepositoryError::not_found("kanban column", id));
        }
        for story in state
            .stories
            .values_mut()
            .filter(|story| story.column_id() == Some(id))
        {
            story.detach_column();
        }
        Ok(())
    }
}
