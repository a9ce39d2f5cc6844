//! `PostgreSQL` kanban column repository.

use super::models::ColumnRow;
use crate::board::domain::{
    ColumnId, ColumnName, KanbanColumn, PersistedColumnData, StatusKey,
};
use crate::board::ports::ColumnRepository;
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::{kanban_columns, user_stories};
use crate::persistence::{RepositoryError, RepositoryResult};
use crate::project::domain::ProjectId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// Inserts `columns` on an open connection.
pub(crate) fn insert_columns(
    connection: &mut PgConnection,
    columns: &[KanbanColumn],
) -> RepositoryResult<()> {
    if columns.is_empty() {
        return Ok(());
    }
    let rows: Vec<ColumnRow> = columns.iter().map(to_row).collect();
    diesel::insert_into(kanban_columns::table)
        .values(&rows)
        .execute(connection)?;
    Ok(())
}

#[async_trait]
impl ColumnRepository for PostgresStore {
    async fn store_column(&self, column: &KanbanColumn) -> RepositoryResult<()> {
        let row = to_row(column);
        self.run_blocking(move |connection| {
            diesel::insert_into(kanban_columns::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn update_column(&self, column: &KanbanColumn) -> RepositoryResult<()> {
        let id = column.id();
        let name = column.name().as_str().to_owned();
        let order = column.order();
        self.run_blocking(move |connection| {
            let updated = diesel::update(kanban_columns::table.find(id.into_inner()))
                .set((
                    kanban_columns::name.eq(name),
                    kanban_columns::column_order.eq(order),
                ))
                .execute(connection)?;
            if updated == 0 {
                return Err(RepositoryError::not_found("kanban column", id));
            }
            Ok(())
        })
        .await
    }

    async fn find_column(&self, id: ColumnId) -> RepositoryResult<Option<KanbanColumn>> {
        self.run_blocking(move |connection| {
            let row = kanban_columns::table
                .find(id.into_inner())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn find_column_by_status(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> RepositoryResult<Option<KanbanColumn>> {
        let lookup = status.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = kanban_columns::table
                .filter(kanban_columns::project_id.eq(project_id.into_inner()))
                .filter(kanban_columns::status.eq(lookup))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?;
            row.map(row_to_column).transpose()
        })
        .await
    }

    async fn list_columns_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<KanbanColumn>> {
        self.run_blocking(move |connection| {
            kanban_columns::table
                .filter(kanban_columns::project_id.eq(project_id.into_inner()))
                .order((kanban_columns::column_order.asc(), kanban_columns::name.asc()))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?
                .into_iter()
                .map(row_to_column)
                .collect()
        })
        .await
    }

    async fn delete_column(&self, id: ColumnId) -> RepositoryResult<()> {
        self.run_transaction(move |connection| {
            diesel::update(
                user_stories::table.filter(user_stories::kanban_column_id.eq(id.into_inner())),
            )
            .set(user_stories::kanban_column_id.eq(None::<uuid::Uuid>))
            .execute(connection)?;
            let removed =
                diesel::delete(kanban_columns::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::not_found("kanban column", id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(column: &KanbanColumn) -> ColumnRow {
    ColumnRow {
        id: column.id().into_inner(),
        project_id: column.project_id().into_inner(),
        name: column.name().as_str().to_owned(),
        status: column.status().as_str().to_owned(),
        column_order: column.order(),
        is_default: column.is_default(),
    }
}

fn row_to_column(row: ColumnRow) -> RepositoryResult<KanbanColumn> {
    let data = PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name: ColumnName::new(row.name).map_err(RepositoryError::database)?,
        status: StatusKey::normalise(&row.status).map_err(RepositoryError::database)?,
        order: row.column_order,
        is_default: row.is_default,
    };
    Ok(KanbanColumn::from_persisted(data))
}
