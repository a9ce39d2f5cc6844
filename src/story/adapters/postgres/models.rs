//! Diesel row models for user stories and assignees.

use crate::persistence::postgres::schema::{user_stories, user_story_assignees};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for user stories.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StoryRow {
    /// Story identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Planned sprint.
    pub sprint_id: Option<uuid::Uuid>,
    /// Targeted version.
    pub version_id: Option<uuid::Uuid>,
    /// Linked kanban column.
    pub kanban_column_id: Option<uuid::Uuid>,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: String,
    /// Status key.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by story updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = user_stories)]
#[diesel(treat_none_as_null = true)]
pub struct StoryChangeset {
    /// Planned sprint.
    pub sprint_id: Option<uuid::Uuid>,
    /// Targeted version.
    pub version_id: Option<uuid::Uuid>,
    /// Linked kanban column.
    pub kanban_column_id: Option<uuid::Uuid>,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: String,
    /// Status key.
    pub status: String,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for story assignees.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_story_assignees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssigneeRow {
    /// Story identifier.
    pub user_story_id: uuid::Uuid,
    /// Assigned account.
    pub user_id: uuid::Uuid,
}
