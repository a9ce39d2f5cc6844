//! Unit tests for accounts and bearer tokens.

mod auth_tests;
mod domain_tests;
