//! Unit tests for projects and membership.
