//! `PostgreSQL` integration tests.
//!
//! The suite runs against the database named by
//! `SPRINTBOARD_TEST_DATABASE_URL`; when the variable is unset every test
//! returns early. Migrations are applied before each test and are idempotent.
//!
//! Tests are organized into modules by functionality:
//! - `workflow_tests`: cross-aggregate workflows shared with the in-memory suite
//! - `constraint_tests`: unique indexes, including the single-active-sprint index

#[path = "workflows/mod.rs"]
mod workflows;

mod postgres {
    pub mod helpers;

    mod constraint_tests;
    mod workflow_tests;
}
