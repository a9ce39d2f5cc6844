//! Shared fixtures for in-memory integration tests.

use rstest::fixture;
use sprintboard::persistence::memory::InMemoryStore;
use std::sync::Arc;

/// Provides a fresh, empty store for each test.
#[fixture]
pub fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}
