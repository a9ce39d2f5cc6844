//! Unit tests for user stories.

mod service_tests;
