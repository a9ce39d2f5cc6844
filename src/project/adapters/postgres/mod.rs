//! `PostgreSQL` adapters for project persistence.

mod models;
mod repository;
