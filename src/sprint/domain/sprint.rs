//! Sprint aggregate root and lifecycle status.

use super::{ParseSprintStatusError, SprintDomainError, SprintId};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const NAME_MAX_CHARS: usize = 255;

/// Sprint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SprintStatus {
    /// Created but not yet started.
    Planned,
    /// Currently running.
    Active,
    /// Finished; terminal.
    Completed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when the lifecycle permits moving to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Planned, Self::Active) | (Self::Active, Self::Completed)
        )
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planned" => Ok(Self::Planned),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// Validated sprint name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SprintName(String);

impl SprintName {
    /// Creates a trimmed, non-empty sprint name.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptyName`] or
    /// [`SprintDomainError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, SprintDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SprintDomainError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX_CHARS {
            return Err(SprintDomainError::NameTooLong {
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

impl fmt::Display for SprintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive date range covered by a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintSchedule {
    start: NaiveDate,
    end: NaiveDate,
}

impl SprintSchedule {
    /// Creates a schedule; a single-day sprint has `start == end`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDateRange`] when `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SprintDomainError> {
        if end < start {
            return Err(SprintDomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the first day.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// Returns the last day.
    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }
}

/// Input for creating a sprint.
#[derive(Debug, Clone)]
pub struct NewSprint {
    /// Owning project.
    pub project_id: ProjectId,
    /// Sprint name.
    pub name: SprintName,
    /// Date range.
    pub schedule: SprintSchedule,
    /// Initial status.
    pub status: SprintStatus,
}

/// Sprint aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    name: SprintName,
    schedule: SprintSchedule,
    status: SprintStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone)]
pub struct PersistedSprintData {
    /// Persisted identifier.
    pub id: SprintId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: SprintName,
    /// Persisted date range.
    pub schedule: SprintSchedule,
    /// Persisted status.
    pub status: SprintStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Sprint {
    /// Creates a sprint in the requested initial status.
    #[must_use]
    pub fn new(new: NewSprint, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: SprintId::new(),
            project_id: new.project_id,
            name: new.name,
            schedule: new.schedule,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            schedule: data.schedule,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub const fn name(&self) -> &SprintName {
        &self.name
    }

    /// Returns the date range.
    #[must_use]
    pub const fn schedule(&self) -> SprintSchedule {
        self.schedule
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
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

    /// Moves the sprint to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] when the lifecycle
    /// does not permit the move.
    pub fn transition_to(
        &mut self,
        next: SprintStatus,
        clock: &impl Clock,
    ) -> Result<(), SprintDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(SprintDomainError::InvalidTransition {
                sprint_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Starts a planned sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// planned.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.transition_to(SprintStatus::Active, clock)
    }

    /// Completes an active sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// active.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), SprintDomainError> {
        self.transition_to(SprintStatus::Completed, clock)
    }

    /// Renames the sprint and replaces its date range.
    pub fn reschedule(&mut self, name: SprintName, schedule: SprintSchedule, clock: &impl Clock) {
        self.name = name;
        self.schedule = schedule;
        self.updated_at = clock.utc();
    }
}
