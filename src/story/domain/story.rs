//! User story aggregate.

use super::{Description, Priority, StoryDomainError, StoryId};
use crate::board::domain::{ColumnId, StatusKey};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::release::domain::VersionId;
use crate::sprint::domain::SprintId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::fmt;

const TITLE_MAX_CHARS: usize = 255;

/// Validated story title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoryTitle(String);

impl StoryTitle {
    /// Creates a trimmed, non-empty title.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::EmptyTitle`] or
    /// [`StoryDomainError::TitleTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, StoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoryDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(StoryDomainError::TitleTooLong {
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

impl fmt::Display for StoryTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a user story.
#[derive(Debug, Clone)]
pub struct NewUserStory {
    /// Owning project.
    pub project_id: ProjectId,
    /// Title.
    pub title: StoryTitle,
    /// Optional description.
    pub description: Option<Description>,
    /// Priority.
    pub priority: Priority,
    /// Status key.
    pub status: StatusKey,
    /// Column matching `status`, if the board has one.
    pub column_id: Option<ColumnId>,
    /// Sprint to plan the story into.
    pub sprint_id: Option<SprintId>,
    /// Assigned members.
    pub assignees: BTreeSet<UserId>,
}

/// Replacement values applied by a story update.
#[derive(Debug, Clone)]
pub struct StoryRevision {
    /// New title.
    pub title: StoryTitle,
    /// New description.
    pub description: Option<Description>,
    /// New priority.
    pub priority: Priority,
    /// New status key.
    pub status: StatusKey,
    /// Column matching `status`, if the board has one.
    pub column_id: Option<ColumnId>,
    /// New assignee set.
    pub assignees: BTreeSet<UserId>,
}

/// Parameter object for reconstructing a persisted story.
#[derive(Debug, Clone)]
pub struct PersistedStoryData {
    /// Persisted identifier.
    pub id: StoryId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted sprint.
    pub sprint_id: Option<SprintId>,
    /// Persisted version.
    pub version_id: Option<VersionId>,
    /// Persisted column link.
    pub column_id: Option<ColumnId>,
    /// Persisted title.
    pub title: StoryTitle,
    /// Persisted description.
    pub description: Option<Description>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status key.
    pub status: StatusKey,
    /// Persisted assignees.
    pub assignees: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// User story aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStory {
    id: StoryId,
    project_id: ProjectId,
    sprint_id: Option<SprintId>,
    version_id: Option<VersionId>,
    column_id: Option<ColumnId>,
    title: StoryTitle,
    description: Option<Description>,
    priority: Priority,
    status: StatusKey,
    assignees: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserStory {
    /// Creates a user story.
    #[must_use]
    pub fn new(new: NewUserStory, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: StoryId::new(),
            project_id: new.project_id,
            sprint_id: new.sprint_id,
            version_id: None,
            column_id: new.column_id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: new.status,
            assignees: new.assignees,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a story from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStoryData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            sprint_id: data.sprint_id,
            version_id: data.version_id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the story identifier.
    #[must_use]
    pub const fn id(&self) -> StoryId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint the story is planned in; `None` means backlog.
    #[must_use]
    pub const fn sprint_id(&self) -> Option<SprintId> {
        self.sprint_id
    }

    /// Returns the targeted version.
    #[must_use]
    pub const fn version_id(&self) -> Option<VersionId> {
        self.version_id
    }

    /// Returns the linked kanban column.
    #[must_use]
    pub const fn column_id(&self) -> Option<ColumnId> {
        self.column_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &StoryTitle {
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

    /// Returns the status key.
    #[must_use]
    pub const fn status(&self) -> &StatusKey {
        &self.status
    }

    /// Returns the assignees.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<UserId> {
        &self.assignees
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

    /// Plans the story into `sprint_id`, or returns it to the backlog.
    pub fn plan_in(&mut self, sprint_id: Option<SprintId>, clock: &impl Clock) {
        self.sprint_id = sprint_id;
        self.updated_at = clock.utc();
    }

    /// Targets the story at `version_id`, or clears the target.
    pub fn target_version(&mut self, version_id: Option<VersionId>, clock: &impl Clock) {
        self.version_id = version_id;
        self.updated_at = clock.utc();
    }

    /// Sets the status key and column link.
    pub fn move_to(&mut self, status: StatusKey, column_id: Option<ColumnId>, clock: &impl Clock) {
        self.status = status;
        self.column_id = column_id;
        self.updated_at = clock.utc();
    }

    /// Replaces the editable fields.
    pub fn revise(&mut self, revision: StoryRevision, clock: &impl Clock) {
        self.title = revision.title;
        self.description = revision.description;
        self.priority = revision.priority;
        self.status = revision.status;
        self.column_id = revision.column_id;
        self.assignees = revision.assignees;
        self.updated_at = clock.utc();
    }

    pub(crate) const fn detach_sprint(&mut self) {
        self.sprint_id = None;
    }

    pub(crate) const fn detach_version(&mut self) {
        self.version_id = None;
    }

    pub(crate) const fn detach_column(&mut self) {
        self.column_id = None;
    }
}
