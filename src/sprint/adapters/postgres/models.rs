//! Diesel row models for sprints.

use crate::persistence::postgres::schema::sprints;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query and insert row for sprint records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    /// Sprint identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Sprint name.
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by sprint updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = sprints)]
pub struct SprintChangeset {
    /// New name.
    pub name: String,
    /// New first day.
    pub start_date: NaiveDate,
    /// New last day.
    pub end_date: NaiveDate,
    /// New status.
    pub status: String,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}
