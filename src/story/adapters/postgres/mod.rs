//! `PostgreSQL` adapters for user story persistence.

mod models;
mod repository;
