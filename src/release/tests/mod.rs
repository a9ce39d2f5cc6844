//! Unit tests for versions.

mod domain_tests;
mod service_tests;
