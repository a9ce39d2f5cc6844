//! Project aggregate.

use super::{ProjectDomainError, ProjectId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeSet;
use std::fmt;

const NAME_MAX_CHARS: usize = 255;

/// Validated project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a trimmed, non-empty project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] or
    /// [`ProjectDomainError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX_CHARS {
            return Err(ProjectDomainError::NameTooLong {
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

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Project name.
    pub name: ProjectName,
    /// Optional description.
    pub description: Option<String>,
    /// Creating account, which becomes the owner.
    pub owner_id: UserId,
    /// Additional members; the owner is always added.
    pub members: BTreeSet<UserId>,
}

/// Project with its owner and member set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<String>,
    owner_id: UserId,
    members: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted owner.
    pub owner_id: UserId,
    /// Persisted members.
    pub members: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project owned by `new.owner_id`.
    #[must_use]
    pub fn new(new: NewProject, clock: &impl Clock) -> Self {
        let NewProject {
            name,
            description,
            owner_id,
            mut members,
        } = new;
        members.insert(owner_id);
        let now = clock.utc();
        Self {
            id: ProjectId::new(),
            name,
            description,
            owner_id,
            members,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a project from persisted storage.
    ///
    /// The owner is added to the member set if storage omitted it.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        let PersistedProjectData {
            id,
            name,
            description,
            owner_id,
            mut members,
            created_at,
            updated_at,
        } = data;
        members.insert(owner_id);
        Self {
            id,
            name,
            description,
            owner_id,
            members,
            created_at,
            updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the member set, owner included.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<UserId> {
        &self.members
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

    /// Returns `true` when `user_id` owns the project.
    #[must_use]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Returns `true` when `user_id` is a member (owners are members).
    #[must_use]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
    }

    /// Renames the project and updates its description.
    pub fn revise(&mut self, name: ProjectName, description: Option<String>, clock: &impl Clock) {
        self.name = name;
        self.description = description;
        self.updated_at = clock.utc();
    }

    /// Replaces the member set; the owner always stays a member.
    pub fn replace_members(&mut self, mut members: BTreeSet<UserId>, clock: &impl Clock) {
        members.insert(self.owner_id);
        self.members = members;
        self.updated_at = clock.utc();
    }
}
