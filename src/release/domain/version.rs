//! Version aggregate.

use super::{ParseVersionStatusError, ReleaseDomainError, VersionId};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const TITLE_MAX_CHARS: usize = 255;
const NUMBER_MAX_CHARS: usize = 64;

/// Release status of a version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionStatus {
    /// Scheduled.
    #[default]
    Planned,
    /// Being prepared.
    InProgress,
    /// Shipped.
    Released,
    /// No longer maintained.
    Archived,
}

impl VersionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Released => "released",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for VersionStatus {
    type Error = ParseVersionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planned" => Ok(Self::Planned),
            "in_progress" => Ok(Self::InProgress),
            "released" => Ok(Self::Released),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseVersionStatusError(value.to_owned())),
        }
    }
}

/// Validated version title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTitle(String);

impl VersionTitle {
    /// Creates a trimmed, non-empty title.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseDomainError::EmptyTitle`] or
    /// [`ReleaseDomainError::TitleTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ReleaseDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReleaseDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX_CHARS {
            return Err(ReleaseDomainError::TitleTooLong {
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

impl fmt::Display for VersionTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version number such as `1.4.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber(String);

impl VersionNumber {
    /// Creates a trimmed version number without inner whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseDomainError::InvalidNumber`] for empty, over-long or
    /// whitespace-containing values.
    pub fn new(value: impl Into<String>) -> Result<Self, ReleaseDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed.chars().count() <= NUMBER_MAX_CHARS
            && !trimmed.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(ReleaseDomainError::InvalidNumber(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a version.
#[derive(Debug, Clone)]
pub struct NewVersion {
    /// Owning project.
    pub project_id: ProjectId,
    /// Title.
    pub title: VersionTitle,
    /// Optional release notes.
    pub description: Option<String>,
    /// Version number.
    pub number: VersionNumber,
    /// Planned release date.
    pub release_date: Option<NaiveDate>,
}

/// Parameter object for reconstructing a persisted version.
#[derive(Debug, Clone)]
pub struct PersistedVersionData {
    /// Persisted identifier.
    pub id: VersionId,
    /// Persisted project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: VersionTitle,
    /// Persisted release notes.
    pub description: Option<String>,
    /// Persisted number.
    pub number: VersionNumber,
    /// Persisted release date.
    pub release_date: Option<NaiveDate>,
    /// Persisted status.
    pub status: VersionStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Version aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    id: VersionId,
    project_id: ProjectId,
    title: VersionTitle,
    description: Option<String>,
    number: VersionNumber,
    release_date: Option<NaiveDate>,
    status: VersionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Version {
    /// Creates a planned version.
    #[must_use]
    pub fn new(new: NewVersion, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id: VersionId::new(),
            project_id: new.project_id,
            title: new.title,
            description: new.description,
            number: new.number,
            release_date: new.release_date,
            status: VersionStatus::Planned,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a version from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedVersionData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            number: data.number,
            release_date: data.release_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the version identifier.
    #[must_use]
    pub const fn id(&self) -> VersionId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &VersionTitle {
        &self.title
    }

    /// Returns the release notes.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the version number.
    #[must_use]
    pub const fn number(&self) -> &VersionNumber {
        &self.number
    }

    /// Returns the release date.
    #[must_use]
    pub const fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> VersionStatus {
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

    /// Replaces title, notes, number and planned release date.
    pub fn revise(
        &mut self,
        title: VersionTitle,
        description: Option<String>,
        number: VersionNumber,
        release_date: Option<NaiveDate>,
        clock: &impl Clock,
    ) {
        self.title = title;
        self.description = description;
        self.number = number;
        self.release_date = release_date;
        self.updated_at = clock.utc();
    }

    /// Sets the status; releasing stamps today's date when none is set.
    pub fn set_status(&mut self, status: VersionStatus, clock: &impl Clock) {
        let now = clock.utc();
        if status == VersionStatus::Released && self.release_date.is_none() {
            self.release_date = Some(now.date_naive());
        }
        self.status = status;
        self.updated_at = now;
    }
}
