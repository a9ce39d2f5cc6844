//! Unit tests for kanban columns.

mod service_tests;
