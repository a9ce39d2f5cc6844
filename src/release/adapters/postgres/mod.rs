//! `PostgreSQL` adapters for version persistence.

mod models;
mod repository;
