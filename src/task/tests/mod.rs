//! Unit tests for tasks.

mod domain_tests;
