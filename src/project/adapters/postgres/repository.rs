//! `PostgreSQL` project repository.

use super::models::{ProjectChangeset, ProjectMemberRow, ProjectRow};
use crate::board::adapters::postgres::insert_columns;
use crate::board::domain::KanbanColumn;
use crate::identity::domain::UserId;
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::{
    kanban_columns, project_members, projects, sprints, tasks, user_stories, versions,
};
use crate::persistence::{RepositoryError, RepositoryResult};
use crate::project::domain::{PersistedProjectData, Project, ProjectId, ProjectName};
use crate::project::ports::ProjectRepository;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

#[async_trait]
impl ProjectRepository for PostgresStore {
    async fn store_project(
        &self,
        project: &Project,
        initial_columns: &[KanbanColumn],
    ) -> RepositoryResult<()> {
        let row = to_row(project);
        let members = member_rows(project);
        let columns = initial_columns.to_vec();
        self.run_transaction(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)?;
            diesel::insert_into(project_members::table)
                .values(&members)
                .execute(connection)?;
            insert_columns(connection, &columns)
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> RepositoryResult<()> {
        let id = project.id();
        let changes = ProjectChangeset {
            name: project.name().as_str().to_owned(),
            description: project.description().map(str::to_owned),
            updated_at: project.updated_at(),
        };
        let members = member_rows(project);
        self.run_transaction(move |connection| {
            let updated = diesel::update(projects::table.find(id.into_inner()))
                .set(&changes)
                .execute(connection)?;
            if updated == 0 {
                return Err(RepositoryError::not_found("project", id));
            }
            diesel::delete(
                project_members::table.filter(project_members::project_id.eq(id.into_inner())),
            )
            .execute(connection)?;
            diesel::insert_into(project_members::table)
                .values(&members)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn find_project_by_owner_and_name(
        &self,
        owner_id: UserId,
        name: &ProjectName,
    ) -> RepositoryResult<Option<Project>> {
        let lookup = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::owner_id.eq(owner_id.into_inner()))
                .filter(projects::name.eq(lookup))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn list_projects_for_member(&self, user_id: UserId) -> RepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .inner_join(project_members::table)
                .filter(project_members::user_id.eq(user_id.into_inner()))
                .order((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)?;
            hydrate(connection, rows)
        })
        .await
    }

    async fn delete_project_cascade(&self, id: ProjectId) -> RepositoryResult<()> {
        self.run_transaction(move |connection| {
            let project_id = id.into_inner();
            let story_ids = user_stories::table
                .filter(user_stories::project_id.eq(project_id))
                .select(user_stories::id)
                .load::<Uuid>(connection)?;
            diesel::delete(tasks::table.filter(tasks::user_story_id.eq_any(&story_ids)))
                .execute(connection)?;
            diesel::delete(user_stories::table.filter(user_stories::project_id.eq(project_id)))
                .execute(connection)?;
            diesel::delete(sprints::table.filter(sprints::project_id.eq(project_id)))
                .execute(connection)?;
            diesel::delete(versions::table.filter(versions::project_id.eq(project_id)))
                .execute(connection)?;
            diesel::delete(kanban_columns::table.filter(kanban_columns::project_id.eq(project_id)))
                .execute(connection)?;
            let removed = diesel::delete(projects::table.find(project_id)).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::not_found("project", id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(project: &Project) -> ProjectRow {
    ProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        owner_id: project.owner_id().into_inner(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn member_rows(project: &Project) -> Vec<ProjectMemberRow> {
    project
        .members()
        .iter()
        .map(|member| ProjectMemberRow {
            project_id: project.id().into_inner(),
            user_id: member.into_inner(),
        })
        .collect()
}

/// Attaches member sets to project rows, preserving row order.
fn hydrate(connection: &mut PgConnection, rows: Vec<ProjectRow>) -> RepositoryResult<Vec<Project>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut members: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
    for member in project_members::table
        .filter(project_members::project_id.eq_any(&ids))
        .select(ProjectMemberRow::as_select())
        .load::<ProjectMemberRow>(connection)?
    {
        members
            .entry(member.project_id)
            .or_default()
            .insert(UserId::from_uuid(member.user_id));
    }
    rows.into_iter()
        .map(|row| {
            let data = PersistedProjectData {
                id: ProjectId::from_uuid(row.id),
                name: ProjectName::new(row.name).map_err(RepositoryError::database)?,
                description: row.description,
                owner_id: UserId::from_uuid(row.owner_id),
                members: members.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            };
            Ok(Project::from_persisted(data))
        })
        .collect()
}
