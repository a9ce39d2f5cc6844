//! `PostgreSQL` adapters for sprint persistence.

mod models;
mod repository;
