//! `PostgreSQL` adapters for account and token persistence.

mod models;
mod repository;
