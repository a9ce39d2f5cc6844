//! `PostgreSQL` user story repository.

use super::models::{AssigneeRow, StoryChangeset, StoryRow};
use crate::board::domain::{ColumnId, StatusKey};
use crate::identity::domain::UserId;
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::{tasks, user_stories, user_story_assignees};
use crate::persistence::{RepositoryError, RepositoryResult};
use crate::project::domain::ProjectId;
use crate::release::domain::VersionId;
use crate::sprint::domain::SprintId;
use crate::story::domain::{
    Description, PersistedStoryData, Priority, StoryId, StoryTitle, UserStory,
};
use crate::story::ports::StoryRepository;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

#[async_trait]
impl StoryRepository for PostgresStore {
    async fn store_story(&self, story: &UserStory) -> RepositoryResult<()> {
        let row = to_row(story);
        let assignees = assignee_rows(story);
        self.run_transaction(move |connection| {
            diesel::insert_into(user_stories::table)
                .values(&row)
                .execute(connection)?;
            insert_assignees(connection, &assignees)
        })
        .await
    }

    async fn update_story(&self, story: &UserStory) -> RepositoryResult<()> {
        let id = story.id();
        let changes = to_changeset(story);
        let assignees = assignee_rows(story);
        self.run_transaction(move |connection| {
            let updated = diesel::update(user_stories::table.find(id.into_inner()))
                .set(&changes)
                .execute(connection)?;
            if updated == 0 {
                return Err(RepositoryError::not_found("user story", id));
            }
            diesel::delete(
                user_story_assignees::table
                    .filter(user_story_assignees::user_story_id.eq(id.into_inner())),
            )
            .execute(connection)?;
            insert_assignees(connection, &assignees)
        })
        .await
    }

    async fn find_story(&self, id: StoryId) -> RepositoryResult<Option<UserStory>> {
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .find(id.into_inner())
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn find_story_by_title(
        &self,
        project_id: ProjectId,
        title: &StoryTitle,
    ) -> RepositoryResult<Option<UserStory>> {
        let lookup = title.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .filter(user_stories::project_id.eq(project_id.into_inner()))
                .filter(user_stories::title.eq(lookup))
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn list_stories_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .filter(user_stories::project_id.eq(project_id.into_inner()))
                .order((user_stories::created_at.asc(), user_stories::id.asc()))
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)?;
            hydrate(connection, rows)
        })
        .await
    }

    async fn list_backlog_stories(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .filter(user_stories::project_id.eq(project_id.into_inner()))
                .filter(user_stories::sprint_id.is_null())
                .order((user_stories::created_at.asc(), user_stories::id.asc()))
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)?;
            hydrate(connection, rows)
        })
        .await
    }

    async fn list_stories_for_sprint(
        &self,
        sprint_id: SprintId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .filter(user_stories::sprint_id.eq(sprint_id.into_inner()))
                .order((user_stories::created_at.asc(), user_stories::id.asc()))
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)?;
            hydrate(connection, rows)
        })
        .await
    }

    async fn list_stories_for_version(
        &self,
        version_id: VersionId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.run_blocking(move |connection| {
            let rows = user_stories::table
                .filter(user_stories::version_id.eq(version_id.into_inner()))
                .order((user_stories::created_at.asc(), user_stories::id.asc()))
                .select(StoryRow::as_select())
                .load::<StoryRow>(connection)?;
            hydrate(connection, rows)
        })
        .await
    }

    async fn delete_story_with_tasks(&self, id: StoryId) -> RepositoryResult<()> {
        self.run_transaction(move |connection| {
            diesel::delete(tasks::table.filter(tasks::user_story_id.eq(id.into_inner())))
                .execute(connection)?;
            let removed =
                diesel::delete(user_stories::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::not_found("user story", id));
            }
            Ok(())
        })
        .await
    }
}

fn insert_assignees(connection: &mut PgConnection, rows: &[AssigneeRow]) -> RepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(user_story_assignees::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn to_row(story: &UserStory) -> StoryRow {
    StoryRow {
        id: story.id().into_inner(),
        project_id: story.project_id().into_inner(),
        sprint_id: story.sprint_id().map(SprintId::into_inner),
        version_id: story.version_id().map(VersionId::into_inner),
        kanban_column_id: story.column_id().map(ColumnId::into_inner),
        title: story.title().as_str().to_owned(),
        description: story.description().map(str::to_owned),
        priority: story.priority().as_str().to_owned(),
        status: story.status().as_str().to_owned(),
        created_at: story.created_at(),
        updated_at: story.updated_at(),
    }
}

fn to_changeset(story: &UserStory) -> StoryChangeset {
    StoryChangeset {
        sprint_id: story.sprint_id().map(SprintId::into_inner),
        version_id: story.version_id().map(VersionId::into_inner),
        kanban_column_id: story.column_id().map(ColumnId::into_inner),
        title: story.title().as_str().to_owned(),
        description: story.description().map(str::to_owned),
        priority: story.priority().as_str().to_owned(),
        status: story.status().as_str().to_owned(),
        updated_at: story.updated_at(),
    }
}

fn assignee_rows(story: &UserStory) -> Vec<AssigneeRow> {
    story
        .assignees()
        .iter()
        .map(|user| AssigneeRow {
            user_story_id: story.id().into_inner(),
            user_id: user.into_inner(),
        })
        .collect()
}

/// Attaches assignee sets to story rows, preserving row order.
fn hydrate(connection: &mut PgConnection, rows: Vec<StoryRow>) -> RepositoryResult<Vec<UserStory>> {
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut assignees: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
    for assignee in user_story_assignees::table
        .filter(user_story_assignees::user_story_id.eq_any(&ids))
        .select(AssigneeRow::as_select())
        .load::<AssigneeRow>(connection)?
    {
        assignees
            .entry(assignee.user_story_id)
            .or_default()
            .insert(UserId::from_uuid(assignee.user_id));
    }
    rows.into_iter()
        .map(|row| {
            let story_assignees = assignees.remove(&row.id).unwrap_or_default();
            row_to_story(row, story_assignees)
        })
        .collect()
}

fn row_to_story(row: StoryRow, assignees: BTreeSet<UserId>) -> RepositoryResult<UserStory> {
    let data = PersistedStoryData {
        id: StoryId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        sprint_id: row.sprint_id.map(SprintId::from_uuid),
        version_id: row.version_id.map(VersionId::from_uuid),
        column_id: row.kanban_column_id.map(ColumnId::from_uuid),
        title: StoryTitle::new(row.title).map_err(RepositoryError::database)?,
        description: Description::optional(row.description).map_err(RepositoryError::database)?,
        priority: Priority::try_from(row.priority.as_str()).map_err(RepositoryError::database)?,
        status: StatusKey::normalise(&row.status).map_err(RepositoryError::database)?,
        assignees,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(UserStory::from_persisted(data))
}
