//! Diesel row models for projects and memberships.

use crate::persistence::postgres::schema::{project_members, projects};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for project records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning account.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by project updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    /// New name.
    pub name: String,
    /// New description.
    pub description: Option<String>,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for project membership.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectMemberRow {
    /// Project identifier.
    pub project_id: uuid::Uuid,
    /// Member account.
    pub user_id: uuid::Uuid,
}
