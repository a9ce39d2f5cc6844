//! Diesel row models for kanban columns.

use crate::persistence::postgres::schema::kanban_columns;
use diesel::prelude::*;

/// Query and insert row for kanban columns.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = kanban_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Normalised status key.
    pub status: String,
    /// Board position.
    pub column_order: i32,
    /// Default flag.
    pub is_default: bool,
}
