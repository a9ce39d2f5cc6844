//! `PostgreSQL` repository implementation for task storage.

use super::models::{TaskChangeset, TaskRow};
use crate::identity::domain::UserId;
use crate::persistence::postgres::PostgresStore;
use crate::persistence::postgres::schema::tasks;
use crate::persistence::{RepositoryError, RepositoryResult};
use crate::story::domain::{Description, Priority, StoryId};
use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle};
use crate::task::ports::TaskRepository;
use async_trait::async_trait;
use diesel::prelude::*;

#[async_trait]
impl TaskRepository for PostgresStore {
    async fn store_task(&self, task: &Task) -> RepositoryResult<()> {
        let new_row = to_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> RepositoryResult<()> {
        let id = task.id();
        let changes = TaskChangeset {
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
            assignee_id: task.assignee_id().map(UserId::into_inner),
            updated_at: task.updated_at(),
        };
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changes)
                .execute(connection)?;
            if updated == 0 {
                return Err(RepositoryError::not_found("task", id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_task_by_title(
        &self,
        story_id: StoryId,
        title: &TaskTitle,
    ) -> RepositoryResult<Option<Task>> {
        let lookup = title.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::user_story_id.eq(story_id.into_inner()))
                .filter(tasks::title.eq(lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks_for_story(&self, story_id: StoryId) -> RepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::user_story_id.eq(story_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(RepositoryError::not_found("task", id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id().into_inner(),
        user_story_id: task.story_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assignee_id: task.assignee_id().map(UserId::into_inner),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> RepositoryResult<Task> {
    let TaskRow {
        id,
        user_story_id,
        title,
        description,
        priority,
        status,
        assignee_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        story_id: StoryId::from_uuid(user_story_id),
        title: TaskTitle::new(title).map_err(RepositoryError::database)?,
        description: Description::optional(description).map_err(RepositoryError::database)?,
        priority: Priority::try_from(priority.as_str()).map_err(RepositoryError::database)?,
        status: TaskStatus::try_from(status.as_str()).map_err(RepositoryError::database)?,
        assignee_id: assignee_id.map(UserId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
