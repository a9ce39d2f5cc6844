//! `PostgreSQL` adapters for kanban column persistence.

mod models;
mod repository;

pub(crate) use repository::insert_columns;
