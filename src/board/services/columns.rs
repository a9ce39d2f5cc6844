//! Kanban column bookkeeping.

use crate::board::domain::{
    BoardDomainError, ColumnId, ColumnName, KanbanColumn, NewKanbanColumn, StatusKey,
};
use crate::board::ports::ColumnRepository;
use crate::identity::domain::UserId;
use crate::persistence::{RepositoryError, constraints};
use crate::project::domain::ProjectId;
use crate::project::ports::ProjectRepository;
use crate::project::services::{AccessError, require_member};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for adding a custom column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumnRequest {
    project_id: ProjectId,
    name: String,
    status: String,
    order: Option<i32>,
}

impl CreateColumnRequest {
    /// Creates a request; the column is appended after the last one.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            status: status.into(),
            order: None,
        }
    }

    /// Places the column at `order`.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// Request payload for renaming or moving a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateColumnRequest {
    name: String,
    order: Option<i32>,
}

impl UpdateColumnRequest {
    /// Creates a rename request.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            order: None,
        }
    }

    /// Moves the column; ignored for default columns.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

/// Service-level errors for kanban column operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The column does not exist.
    #[error("kanban column not found: {0}")]
    NotFound(ColumnId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The project already has a column with this status key.
    #[error("project {project_id} already has a column with status {status}")]
    DuplicateStatus {
        /// Project holding the clashing column.
        project_id: ProjectId,
        /// Normalised status key.
        status: StatusKey,
    },
    /// Default columns cannot be deleted.
    #[error("default column {0} cannot be deleted")]
    DefaultColumnProtected(ColumnId),
    /// Access check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for kanban column operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Kanban column orchestration service.
#[derive(Clone)]
pub struct BoardService<S>
where
    S: ColumnRepository + ProjectRepository,
{
    store: Arc<S>,
}

impl<S> BoardService<S>
where
    S: ColumnRepository + ProjectRepository,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Adds whichever default columns the project is missing and returns the
    /// full board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] on storage failure.
    #[tracing::instrument(skip(self))]
    pub async fn initialize_defaults(
        &self,
        project_id: ProjectId,
    ) -> BoardServiceResult<Vec<KanbanColumn>> {
        let existing = self.store.list_columns_for_project(project_id).await?;
        let missing = KanbanColumn::defaults_for(project_id)
            .into_iter()
            .filter(|column| {
                existing
                    .iter()
                    .all(|present| present.status() != column.status())
            })
            .collect::<Vec<_>>();
        for column in &missing {
            self.store.store_column(column).await?;
        }
        if !missing.is_empty() {
            info!(added = missing.len(), "initialised default columns");
        }
        Ok(self.store.list_columns_for_project(project_id).await?)
    }

    /// Adds a custom column to a project `acting` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotMember`], a validation error, or
    /// [`BoardServiceError::DuplicateStatus`].
    #[tracing::instrument(skip(self, request), fields(project_id = %request.project_id))]
    pub async fn create(
        &self,
        request: CreateColumnRequest,
        acting: UserId,
    ) -> BoardServiceResult<KanbanColumn> {
        let project_id = request.project_id;
        require_member(&*self.store, project_id, acting).await?;
        let name = ColumnName::new(request.name)?;
        let status = StatusKey::normalise(&request.status)?;
        if self
            .store
            .find_column_by_status(project_id, &status)
            .await?
            .is_some()
        {
            return Err(BoardServiceError::DuplicateStatus { project_id, status });
        }
        let order = self.position_for(project_id, request.order).await?;
        let column = KanbanColumn::new(NewKanbanColumn {
            project_id,
            name,
            status,
            order,
        });
        self.store.store_column(&column).await.map_err(|err| {
            if err.violates(constraints::COLUMNS_PROJECT_STATUS) {
                BoardServiceError::DuplicateStatus {
                    project_id,
                    status: column.status().clone(),
                }
            } else {
                BoardServiceError::Repository(err)
            }
        })?;
        info!(column_id = %column.id(), status = %column.status(), "created column");
        Ok(column)
    }

    /// Lists the columns of a project by board position.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        acting: UserId,
    ) -> BoardServiceResult<Vec<KanbanColumn>> {
        require_member(&*self.store, project_id, acting).await?;
        Ok(self.store.list_columns_for_project(project_id).await?)
    }

    /// Renames a column and, unless it is a default column, moves it.
    ///
    /// The status key never changes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`], [`AccessError::NotMember`],
    /// or a validation error.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        column_id: ColumnId,
        request: UpdateColumnRequest,
        acting: UserId,
    ) -> BoardServiceResult<KanbanColumn> {
        let mut column = self.load_accessible(column_id, acting).await?;
        let name = ColumnName::new(request.name)?;
        column.rearrange(name, request.order);
        self.store.update_column(&column).await?;
        info!("updated column");
        Ok(column)
    }

    /// Deletes a custom column, unlinking the stories shown in it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::NotFound`], [`AccessError::NotMember`],
    /// or [`BoardServiceError::DefaultColumnProtected`].
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, column_id: ColumnId, acting: UserId) -> BoardServiceResult<()> {
        let column = self.load_accessible(column_id, acting).await?;
        if column.is_default() {
            return Err(BoardServiceError::DefaultColumnProtected(column_id));
        }
        self.store.delete_column(column_id).await?;
        info!("deleted column");
        Ok(())
    }

    async fn load_accessible(
        &self,
        column_id: ColumnId,
        acting: UserId,
    ) -> BoardServiceResult<KanbanColumn> {
        let column = self
            .store
            .find_column(column_id)
            .await?
            .ok_or(BoardServiceError::NotFound(column_id))?;
        require_member(&*self.store, column.project_id(), acting).await?;
        Ok(column)
    }

    async fn position_for(
        &self,
        project_id: ProjectId,
        requested: Option<i32>,
    ) -> BoardServiceResult<i32> {
        if let Some(order) = requested {
            return Ok(order);
        }
        let last = self
            .store
            .list_columns_for_project(project_id)
            .await?
            .iter()
            .map(KanbanColumn::order)
            .max()
            .unwrap_or(0);
        Ok(last.saturating_add(1))
    }
}
