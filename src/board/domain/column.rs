//! Kanban column aggregate.

use super::{BoardDomainError, ColumnId, StatusKey};
use crate::project::domain::ProjectId;
use std::fmt;

const NAME_MAX_CHARS: usize = 255;

/// Validated column display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(String);

impl ColumnName {
    /// Creates a trimmed, non-empty column name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyName`] or
    /// [`BoardDomainError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX_CHARS {
            return Err(BoardDomainError::NameTooLong {
                max: NAME_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for a custom column.
#[derive(Debug, Clone)]
pub struct NewKanbanColumn {
    /// Owning project.
    pub project_id: ProjectId,
    /// Display name.
    pub name: ColumnName,
    /// Normalised status key.
    pub status: StatusKey,
    /// Position on the board.
    pub order: i32,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone)]
pub struct PersistedColumnData {
    /// Persisted identifier.
    pub id: ColumnId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: ColumnName,
    /// Persisted status key.
    pub status: StatusKey,
    /// Persisted position.
    pub order: i32,
    /// Persisted default flag.
    pub is_default: bool,
}

/// Column on a project's kanban board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanColumn {
    id: ColumnId,
    project_id: ProjectId,
    name: ColumnName,
    status: StatusKey,
    order: i32,
    is_default: bool,
}

impl KanbanColumn {
    /// Creates a custom, non-default column.
    #[must_use]
    pub fn new(new: NewKanbanColumn) -> Self {
        Self {
            id: ColumnId::new(),
            project_id: new.project_id,
            name: new.name,
            status: new.status,
            order: new.order,
            is_default: false,
        }
    }

    /// Builds the default "To do", "In progress" and "Done" columns.
    #[must_use]
    pub fn defaults_for(project_id: ProjectId) -> Vec<Self> {
        [
            ("To do", StatusKey::TODO, 1),
            ("In progress", StatusKey::IN_PROGRESS, 2),
            ("Done", StatusKey::DONE, 3),
        ]
        .into_iter()
        .map(|(name, status, order)| Self {
            id: ColumnId::new(),
            project_id,
            name: ColumnName(name.to_owned()),
            status: StatusKey::from_static(status),
            order,
            is_default: true,
        })
        .collect()
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            status: data.status,
            order: data.order,
            is_default: data.is_default,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ColumnName {
        &self.name
    }

    /// Returns the status key.
    #[must_use]
    pub const fn status(&self) -> &StatusKey {
        &self.status
    }

    /// Returns the board position.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns `true` for the columns created with the project.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Renames the column and, for custom columns only, moves it to `order`.
    pub fn rearrange(&mut self, name: ColumnName, order: Option<i32>) {
        self.name = name;
        if let Some(position) = order.filter(|_| !self.is_default) {
            self.order = position;
        }
    }
}
