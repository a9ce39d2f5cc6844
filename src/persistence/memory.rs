//! Lock-protected in-memory store.
//!
//! A single [`InMemoryStore`] holds every aggregate behind one `RwLock`, so
//! multi-aggregate writes are atomic in the same way a database transaction
//! is. Unique constraints are checked under the write lock and reported with
//! the constraint names from [`super::constraints`].

use super::{RepositoryError, RepositoryResult};
use crate::board::domain::{ColumnId, KanbanColumn};
use crate::identity::domain::{StoredToken, TokenDigest, User, UserId};
use crate::project::domain::{Project, ProjectId};
use crate::release::domain::{Version, VersionId};
use crate::sprint::domain::{Sprint, SprintId};
use crate::story::domain::{StoryId, UserStory};
use crate::task::domain::{Task, TaskId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory store implementing every repository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) tokens: HashMap<TokenDigest, StoredToken>,
    pub(crate) projects: HashMap<ProjectId, Project>,
    pub(crate) sprints: HashMap<SprintId, Sprint>,
    pub(crate) stories: HashMap<StoryId, UserStory>,
    pub(crate) tasks: HashMap<TaskId, Task>,
    pub(crate) columns: HashMap<ColumnId, KanbanColumn>,
    pub(crate) versions: HashMap<VersionId, Version>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| RepositoryError::connection(err.to_string()))
    }

    pub(crate) fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|err| RepositoryError::connection(err.to_string()))
    }
}

/// Clones the values matching `keep`, sorted by `key`.
pub(crate) fn collect_sorted<'a, T, K, F, G>(
    values: impl Iterator<Item = &'a T>,
    keep: F,
    key: G,
) -> Vec<T>
where
    T: Clone + 'a,
    K: Ord,
    F: Fn(&T) -> bool,
    G: Fn(&T) -> K,
{
    let mut selected: Vec<T> = values.filter(|value| keep(value)).cloned().collect();
    selected.sort_by_key(key);
    selected
}
