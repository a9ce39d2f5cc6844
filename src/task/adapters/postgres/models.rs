//! Diesel row models for task persistence.

use crate::persistence::postgres::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent story.
    pub user_story_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by task updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}
