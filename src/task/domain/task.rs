//! Task aggregate root and workflow status.

use super::{ParseTaskStatusError, TaskDomainError, TaskId};
use crate::identity::domain::UserId;
use crate::story::domain::{Description, Priority, StoryId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const TITLE_MAX_CHARS: usize = 255;

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a trimmed, non-empty title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::TitleTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(TaskDomainError::TitleTooLong {
                max: TITLE_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Parent story.
    pub story_id: StoryId,
    /// Title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<Description>,
    /// Priority.
    pub priority: Priority,
    /// Initial status.
    pub status: TaskStatus,
    /// Optional assignee.
    pub assignee_id: Option<UserId>,
}

/// Replacement values applied by a task update.
#[derive(Debug, Clone)]
pub struct TaskRevision {
    /// New title.
    pub title: TaskTitle,
    /// New description.
    pub description: Option<Description>,
    /// New priority.
    pub priority: Priority,
    /// New status.
    pub status: TaskStatus,
    /// New assignee; `None` clears it.
    pub assignee_id: Option<UserId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    story_id: StoryId,
    title: TaskTitle,
    description: Option<Description>,
    priority: Priority,
    status: TaskStatus,
    assignee_id: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted parent story.
    pub story_id: StoryId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<Description>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee.
    pub assignee_id: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task.
    #[must_use]
    pub fn new(new: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            story_id: new.story_id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: new.status,
            assignee_id: new.assignee_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            story_id: data.story_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assignee_id: data.assignee_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent story.
    #[must_use]
    pub const fn story_id(&self) -> StoryId {
        self.story_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().map(Description::as_str)
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the editable fields.
    pub fn revise(&mut self, revision: TaskRevision, clock: &impl Clock) {
        self.title = revision.title;
        self.description = revision.description;
        self.priority = revision.priority;
        self.status = revision.status;
        self.assignee_id = revision.assignee_id;
        self.updated_at = clock.utc();
    }
}
