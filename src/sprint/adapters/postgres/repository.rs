//! `PostgreSQL` sprint repository.

use super::models::{SprintChangeset, SprintRow};
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::{sprints, user_stories};
use crate::persistence::{RepositoryError, RepositoryResult, row_count};
use crate::project::domain::ProjectId;
use crate::sprint::domain::{
    PersistedSprintData, Sprint, SprintId, SprintName, SprintSchedule, SprintStatus,
};
use crate::sprint::ports::SprintRepository;
use async_trait::async_trait;
use diesel::prelude::*;

#[async_trait]
impl SprintRepository for PostgresStore {
    async fn store_sprint(&self, sprint: &Sprint) -> RepositoryResult<()> {
        let row = to_row(sprint);
        self.run_blocking(move |connection| {
            diesel::insert_into(sprints::table)
                .values(&row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn update_sprint(&self, sprint: &Sprint) -> RepositoryResult<()> {
        let id = sprint.id();
        let changes = SprintChangeset {
            name: sprint.name().as_str().to_owned(),
            start_date: sprint.schedule().start(),
            end_date: sprint.schedule().end(),
            status: sprint.status().as_str().to_owned(),
            updated_at: sprint.updated_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(sprints::table.find(id.into_inner()))
                .set(&changes)
                .execute(connection)?;
            if updated == 0 {
                return Err(RepositoryError::not_found("sprint", id));
            }
            Ok(())
        })
        .await
    }

    async fn find_sprint(&self, id: SprintId) -> RepositoryResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .find(id.into_inner())
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn find_sprint_by_name(
        &self,
        project_id: ProjectId,
        name: &SprintName,
    ) -> RepositoryResult<Option<Sprint>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = sprints::table
                .filter(sprints::project_id.eq(project_id.into_inner()))
                .filter(sprints::name.eq(lookup))
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn find_active_sprint(&self, project_id: ProjectId) -> RepositoryResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .filter(sprints::project_id.eq(project_id.into_inner()))
                .filter(sprints::status.eq(SprintStatus::Active.as_str()))
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn list_sprints_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<Sprint>> {
        self.run_blocking(move |connection| {
            sprints::table
                .filter(sprints::project_id.eq(project_id.into_inner()))
                .order((sprints::start_date.asc(), sprints::name.asc()))
                .select(SprintRow::as_select())
                .load::<SprintRow>(connection)?
                .into_iter()
                .map(row_to_sprint)
                .collect()
        })
        .await
    }

    async fn delete_sprint_detaching_stories(&self, id: SprintId) -> RepositoryResult<u64> {
        self.run_transaction(move |connection| {
            let detached = diesel::update(
                user_stories::table.filter(user_stories::sprint_id.eq(id.into_inner())),
            )
            .set(user_stories::sprint_id.eq(None::<uuid::Uuid>))
            .execute(connection)?;
            let removed = diesel::delete(sprints::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::not_found("sprint", id));
            }
            row_count(detached)
        })
        .await
    }
}

fn to_row(sprint: &Sprint) -> SprintRow {
    SprintRow {
        id: sprint.id().into_inner(),
        project_id: sprint.project_id().into_inner(),
        name: sprint.name().as_str().to_owned(),
        start_date: sprint.schedule().start(),
        end_date: sprint.schedule().end(),
        status: sprint.status().as_str().to_owned(),
        created_at: sprint.created_at(),
        updated_at: sprint.updated_at(),
    }
}

fn row_to_sprint(row: SprintRow) -> RepositoryResult<Sprint> {
    let data = PersistedSprintData {
        id: SprintId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        name: SprintName::new(row.name).map_err(RepositoryError::database)?,
        schedule: SprintSchedule::new(row.start_date, row.end_date)
            .map_err(RepositoryError::database)?,
        status: SprintStatus::try_from(row.status.as_str()).map_err(RepositoryError::database)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Sprint::from_persisted(data))
}
