//! Version tracking and story targeting.

use crate::identity::domain::UserId;
use crate::persistence::{RepositoryError, constraints};
use crate::project::domain::ProjectId;
use crate::project::ports::ProjectRepository;
use crate::project::services::{AccessError, require_member};
use crate::release::domain::{
    NewVersion, ReleaseDomainError, Version, VersionId, VersionNumber, VersionStatus,
    VersionTitle,
};
use crate::release::ports::VersionRepository;
use crate::story::domain::{StoryId, UserStory};
use crate::story::ports::StoryRepository;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload describing a version's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequest {
    title: String,
    number: String,
    description: Option<String>,
    release_date: Option<NaiveDate>,
}

impl VersionRequest {
    /// Creates a request with the required title and version number.
    #[must_use]
    pub fn new(title: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            number: number.into(),
            description: None,
            release_date: None,
        }
    }

    /// Sets the release notes.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the planned release date.
    #[must_use]
    pub const fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }
}

/// Request payload for updating a version; replaces every editable field.
pub type UpdateVersionRequest = VersionRequest;

/// Service-level errors for version operations.
#[derive(Debug, Error)]
pub enum ReleaseServiceError {
    /// The version does not exist.
    #[error("version not found: {0}")]
    NotFound(VersionId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ReleaseDomainError),
    /// The project already has a version with this number.
    #[error("version number '{number}' already exists in project {project_id}")]
    DuplicateVersionNumber {
        /// Project holding the clashing version.
        project_id: ProjectId,
        /// Requested number.
        number: String,
    },
    /// The project already has a version with this title.
    #[error("a version titled '{title}' already exists in project {project_id}")]
    DuplicateTitle {
        /// Project holding the clashing version.
        project_id: ProjectId,
        /// Requested title.
        title: String,
    },
    /// The user story does not exist.
    #[error("user story not found: {0}")]
    StoryNotFound(StoryId),
    /// The user story belongs to a different project than the version.
    #[error("user story {story_id} does not belong to project {project_id}")]
    ProjectMismatch {
        /// Story being targeted.
        story_id: StoryId,
        /// Project of the version.
        project_id: ProjectId,
    },
    /// Access check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for version operations.
pub type ReleaseServiceResult<T> = Result<T, ReleaseServiceError>;

/// Version orchestration service.
#[derive(Clone)]
pub struct ReleaseService<S, C>
where
    S: VersionRepository + ProjectRepository + StoryRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ReleaseService<S, C>
where
    S: VersionRepository + ProjectRepository + StoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new release service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a planned version in a project `acting` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotMember`], a validation error,
    /// [`ReleaseServiceError::DuplicateVersionNumber`], or
    /// [`ReleaseServiceError::DuplicateTitle`].
    #[tracing::instrument(skip(self, request))]
    pub async fn create(
        &self,
        project_id: ProjectId,
        request: VersionRequest,
        acting: UserId,
    ) -> ReleaseServiceResult<Version> {
        require_member(&*self.store, project_id, acting).await?;
        let title = VersionTitle::new(request.title)?;
        let number = VersionNumber::new(request.number)?;
        self.ensure_unique(project_id, &title, &number, None).await?;
        let version = Version::new(
            NewVersion {
                project_id,
                title,
                description: request.description,
                number,
                release_date: request.release_date,
            },
            &*self.clock,
        );
        self.store
            .store_version(&version)
            .await
            .map_err(|err| constraint_error(err, &version))?;
        info!(version_id = %version.id(), number = %version.number(), "created version");
        Ok(version)
    }

    /// Lists the versions of a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        acting: UserId,
    ) -> ReleaseServiceResult<Vec<Version>> {
        require_member(&*self.store, project_id, acting).await?;
        Ok(self.store.list_versions_for_project(project_id).await?)
    }

    /// Loads a version visible to `acting`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`] or [`AccessError::NotMember`].
    pub async fn get(&self, version_id: VersionId, acting: UserId) -> ReleaseServiceResult<Version> {
        self.load_accessible(version_id, acting).await
    }

    /// Replaces the title, notes, number and release date of a version.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`], [`AccessError::NotMember`],
    /// or a duplicate error when another version of the project already uses
    /// the new number or title.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        version_id: VersionId,
        request: UpdateVersionRequest,
        acting: UserId,
    ) -> ReleaseServiceResult<Version> {
        let mut version = self.load_accessible(version_id, acting).await?;
        let title = VersionTitle::new(request.title)?;
        let number = VersionNumber::new(request.number)?;
        self.ensure_unique(version.project_id(), &title, &number, Some(version_id))
            .await?;
        version.revise(
            title,
            request.description,
            number,
            request.release_date,
            &*self.clock,
        );
        self.store
            .update_version(&version)
            .await
            .map_err(|err| constraint_error(err, &version))?;
        info!("updated version");
        Ok(version)
    }

    /// Sets the status of a version.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`] or [`AccessError::NotMember`].
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        version_id: VersionId,
        status: VersionStatus,
        acting: UserId,
    ) -> ReleaseServiceResult<Version> {
        let mut version = self.load_accessible(version_id, acting).await?;
        version.set_status(status, &*self.clock);
        self.store.update_version(&version).await?;
        info!(status = %version.status(), "changed version status");
        Ok(version)
    }

    /// Deletes a version, clearing the target of its stories.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`] or [`AccessError::NotMember`].
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, version_id: VersionId, acting: UserId) -> ReleaseServiceResult<()> {
        self.load_accessible(version_id, acting).await?;
        self.store.delete_version_detaching_stories(version_id).await?;
        info!("deleted version");
        Ok(())
    }

    /// Targets a user story of the same project at a version.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`], [`AccessError::NotMember`],
    /// [`ReleaseServiceError::StoryNotFound`], or
    /// [`ReleaseServiceError::ProjectMismatch`].
    #[tracing::instrument(skip(self))]
    pub async fn assign_story(
        &self,
        version_id: VersionId,
        story_id: StoryId,
        acting: UserId,
    ) -> ReleaseServiceResult<UserStory> {
        let version = self.load_accessible(version_id, acting).await?;
        let mut story = self.load_story_in(story_id, version.project_id()).await?;
        story.target_version(Some(version_id), &*self.clock);
        self.store.update_story(&story).await?;
        info!("targeted user story at version");
        Ok(story)
    }

    /// Clears the version target of a user story.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`], [`AccessError::NotMember`],
    /// [`ReleaseServiceError::StoryNotFound`], or
    /// [`ReleaseServiceError::ProjectMismatch`].
    #[tracing::instrument(skip(self))]
    pub async fn remove_story(
        &self,
        version_id: VersionId,
        story_id: StoryId,
        acting: UserId,
    ) -> ReleaseServiceResult<UserStory> {
        let version = self.load_accessible(version_id, acting).await?;
        let mut story = self.load_story_in(story_id, version.project_id()).await?;
        if story.version_id() == Some(version_id) {
            story.target_version(None, &*self.clock);
            self.store.update_story(&story).await?;
            info!("removed user story from version");
        }
        Ok(story)
    }

    /// Lists the user stories targeted at a version.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseServiceError::NotFound`] or [`AccessError::NotMember`].
    pub async fn stories_in_version(
        &self,
        version_id: VersionId,
        acting: UserId,
    ) -> ReleaseServiceResult<Vec<UserStory>> {
        self.load_accessible(version_id, acting).await?;
        Ok(self.store.list_stories_for_version(version_id).await?)
    }

    async fn load_accessible(
        &self,
        version_id: VersionId,
        acting: UserId,
    ) -> ReleaseServiceResult<Version> {
        let version = self
            .store
            .find_version(version_id)
            .await?
            .ok_or(ReleaseServiceError::NotFound(version_id))?;
        require_member(&*self.store, version.project_id(), acting).await?;
        Ok(version)
    }

    async fn load_story_in(
        &self,
        story_id: StoryId,
        project_id: ProjectId,
    ) -> ReleaseServiceResult<UserStory> {
        let story = self
            .store
            .find_story(story_id)
            .await?
            .ok_or(ReleaseServiceError::StoryNotFound(story_id))?;
        if story.project_id() != project_id {
            return Err(ReleaseServiceError::ProjectMismatch {
                story_id,
                project_id,
            });
        }
        Ok(story)
    }

    async fn ensure_unique(
        &self,
        project_id: ProjectId,
        title: &VersionTitle,
        number: &VersionNumber,
        current: Option<VersionId>,
    ) -> ReleaseServiceResult<()> {
        let is_other = |found: Option<Version>| found.is_some_and(|v| Some(v.id()) != current);
        if is_other(self.store.find_version_by_number(project_id, number).await?) {
            return Err(ReleaseServiceError::DuplicateVersionNumber {
                project_id,
                number: number.to_string(),
            });
        }
        if is_other(self.store.find_version_by_title(project_id, title).await?) {
            return Err(ReleaseServiceError::DuplicateTitle {
                project_id,
                title: title.to_string(),
            });
        }
        Ok(())
    }
}

fn constraint_error(err: RepositoryError, version: &Version) -> ReleaseServiceError {
    if err.violates(constraints::VERSIONS_PROJECT_NUMBER) {
        ReleaseServiceError::DuplicateVersionNumber {
            project_id: version.project_id(),
            number: version.number().to_string(),
        }
    } else if err.violates(constraints::VERSIONS_PROJECT_TITLE) {
        ReleaseServiceError::DuplicateTitle {
            project_id: version.project_id(),
            title: version.title().to_string(),
        }
    } else {
        ReleaseServiceError::Repository(err)
    }
}
