//! Diesel row models for versions.

use crate::persistence::postgres::schema::versions;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query and insert row for versions.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = versions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VersionRow {
    /// Version identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Release notes.
    pub description: Option<String>,
    /// Version number.
    pub version_number: String,
    /// Release date.
    pub release_date: Option<NaiveDate>,
    /// Release status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by version updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = versions)]
#[diesel(treat_none_as_null = true)]
pub struct VersionChangeset {
    /// Title.
    pub title: String,
    /// Release notes.
    pub description: Option<String>,
    /// Version number.
    pub version_number: String,
    /// Release date.
    pub release_date: Option<NaiveDate>,
    /// Release status.
    pub status: String,
    /// Update timestamp.
    pub updated_at: DateTime<Utc>,
}
