//! Sprint lifecycle guard.
//!
//! Failures are reported in a fixed order: a missing sprint or project first,
//! then missing ownership, then an illegal transition, and finally a
//! violation of the single-active-sprint invariant.

use crate::identity::domain::UserId;
use crate::persistence::{RepositoryError, constraints};
use crate::project::domain::ProjectId;
use crate::project::ports::ProjectRepository;
use crate::project::services::{AccessError, require_member, require_owner};
use crate::sprint::domain::{
    NewSprint, Sprint, SprintDomainError, SprintId, SprintName, SprintSchedule, SprintStatus,
};
use crate::sprint::ports::SprintRepository;
use crate::story::domain::{StoryId, UserStory};
use crate::story::ports::StoryRepository;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    project_id: ProjectId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: Option<SprintStatus>,
}

impl CreateSprintRequest {
    /// Creates a request for a planned sprint.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            start_date,
            end_date,
            status: None,
        }
    }

    /// Overrides the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: SprintStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for renaming or rescheduling a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSprintRequest {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl UpdateSprintRequest {
    /// Creates an update request.
    #[must_use]
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
        }
    }
}

/// Service-level errors for sprint operations.
#[derive(Debug, Error)]
pub enum SprintLifecycleError {
    /// The sprint does not exist.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),
    /// Project lookup or access check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Validation or lifecycle transition failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),
    /// Another sprint of the project is already active.
    #[error("project {project_id} already has an active sprint")]
    ConflictingActiveSprint {
        /// Project whose invariant would be violated.
        project_id: ProjectId,
    },
    /// The project already has a sprint with this name.
    #[error("a sprint named '{name}' already exists in project {project_id}")]
    DuplicateName {
        /// Project holding the clashing sprint.
        project_id: ProjectId,
        /// Requested name.
        name: String,
    },
    /// The user story does not exist.
    #[error("user story not found: {0}")]
    StoryNotFound(StoryId),
    /// The user story belongs to a different project than the sprint.
    #[error("user story {story_id} does not belong to project {project_id}")]
    ProjectMismatch {
        /// Story being planned.
        story_id: StoryId,
        /// Project of the sprint.
        project_id: ProjectId,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for sprint operations.
pub type SprintLifecycleResult<T> = Result<T, SprintLifecycleError>;

/// Sprint lifecycle guard and sprint planning service.
#[derive(Clone)]
pub struct SprintLifecycleService<S, C>
where
    S: SprintRepository + ProjectRepository + StoryRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SprintLifecycleService<S, C>
where
    S: SprintRepository + ProjectRepository + StoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sprint lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a sprint in the requested status, `planned` by default.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence, [`AccessError::ProjectNotFound`],
    /// [`AccessError::NotOwner`], [`SprintDomainError::InvalidDateRange`],
    /// [`SprintLifecycleError::DuplicateName`], and
    /// [`SprintLifecycleError::ConflictingActiveSprint`] for an active
    /// sprint in a project that already has one.
    #[tracing::instrument(skip(self, request), fields(project_id = %request.project_id))]
    pub async fn create(
        &self,
        request: CreateSprintRequest,
        acting: UserId,
    ) -> SprintLifecycleResult<Sprint> {
        let project_id = request.project_id;
        require_owner(&*self.store, project_id, acting).await?;
        let name = SprintName::new(request.name)?;
        let schedule = SprintSchedule::new(request.start_date, request.end_date)?;
        self.ensure_name_free(project_id, &name, None).await?;
        let status = request.status.unwrap_or(SprintStatus::Planned);
        if status == SprintStatus::Active {
            self.ensure_no_active_sprint(project_id, None).await?;
        }
        let sprint = Sprint::new(
            NewSprint {
                project_id,
                name,
                schedule,
                status,
            },
            &*self.clock,
        );
        self.store
            .store_sprint(&sprint)
            .await
            .map_err(|err| constraint_error(err, &sprint))?;
        info!(sprint_id = %sprint.id(), status = %sprint.status(), "created sprint");
        Ok(sprint)
    }

    /// Starts a planned sprint.
    ///
    /// # Errors
    ///
    /// Returns, in order of precedence, [`SprintLifecycleError::NotFound`],
    /// [`AccessError::NotOwner`], [`SprintDomainError::InvalidTransition`]
    /// unless the sprint is planned, and
    /// [`SprintLifecycleError::ConflictingActiveSprint`].
    #[tracing::instrument(skip(self))]
    pub async fn start(&self, sprint_id: SprintId, acting: UserId) -> SprintLifecycleResult<Sprint> {
        let mut sprint = self.load_sprint(sprint_id).await?;
        require_owner(&*self.store, sprint.project_id(), acting).await?;
        sprint.start(&*self.clock)?;
        self.ensure_no_active_sprint(sprint.project_id(), Some(sprint_id))
            .await?;
        self.store
            .update_sprint(&sprint)
            .await
            .map_err(|err| constraint_error(err, &sprint))?;
        info!("started sprint");
        Ok(sprint)
    }

    /// Completes an active sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::NotFound`], [`AccessError::NotOwner`],
    /// or [`SprintDomainError::InvalidTransition`] unless the sprint is
    /// active.
    #[tracing::instrument(skip(self))]
    pub async fn complete(
        &self,
        sprint_id: SprintId,
        acting: UserId,
    ) -> SprintLifecycleResult<Sprint> {
        let mut sprint = self.load_sprint(sprint_id).await?;
        require_owner(&*self.store, sprint.project_id(), acting).await?;
        sprint.complete(&*self.clock)?;
        self.store.update_sprint(&sprint).await?;
        info!("completed sprint");
        Ok(sprint)
    }

    /// Deletes a sprint in any status, returning its stories to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::NotFound`] or
    /// [`AccessError::NotOwner`].
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, sprint_id: SprintId, acting: UserId) -> SprintLifecycleResult<()> {
        let sprint = self.load_sprint(sprint_id).await?;
        require_owner(&*self.store, sprint.project_id(), acting).await?;
        let detached = self.store.delete_sprint_detaching_stories(sprint_id).await?;
        info!(detached, "deleted sprint");
        Ok(())
    }

    /// Loads a sprint visible to `acting`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::NotFound`] or
    /// [`AccessError::NotMember`].
    pub async fn get(&self, sprint_id: SprintId, acting: UserId) -> SprintLifecycleResult<Sprint> {
        let sprint = self.load_sprint(sprint_id).await?;
        require_member(&*self.store, sprint.project_id(), acting).await?;
        Ok(sprint)
    }

    /// Lists the sprints of a project by start date, then name.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        acting: UserId,
    ) -> SprintLifecycleResult<Vec<Sprint>> {
        require_member(&*self.store, project_id, acting).await?;
        Ok(self.store.list_sprints_for_project(project_id).await?)
    }

    /// Renames and reschedules a sprint; the status is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::NotFound`], [`AccessError::NotOwner`],
    /// [`SprintDomainError::InvalidDateRange`], or
    /// [`SprintLifecycleError::DuplicateName`] when another sprint of the
    /// project has the new name.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        sprint_id: SprintId,
        request: UpdateSprintRequest,
        acting: UserId,
    ) -> SprintLifecycleResult<Sprint> {
        let mut sprint = self.load_sprint(sprint_id).await?;
        require_owner(&*self.store, sprint.project_id(), acting).await?;
        let name = SprintName::new(request.name)?;
        let schedule = SprintSchedule::new(request.start_date, request.end_date)?;
        self.ensure_name_free(sprint.project_id(), &name, Some(sprint_id))
            .await?;
        sprint.reschedule(name, schedule, &*self.clock);
        self.store
            .update_sprint(&sprint)
            .await
            .map_err(|err| constraint_error(err, &sprint))?;
        info!("updated sprint");
        Ok(sprint)
    }

    /// Plans a user story into a sprint of the same project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::NotFound`],
    /// [`AccessError::NotMember`], [`SprintLifecycleError::StoryNotFound`],
    /// or [`SprintLifecycleError::ProjectMismatch`].
    #[tracing::instrument(skip(self))]
    pub async fn assign_story(
        &self,
        sprint_id: SprintId,
        story_id: StoryId,
        acting: UserId,
    ) -> SprintLifecycleResult<UserStory> {
        let sprint = self.load_sprint(sprint_id).await?;
        require_member(&*self.store, sprint.project_id(), acting).await?;
        let mut story = self.load_story(story_id).await?;
        if story.project_id() != sprint.project_id() {
            return Err(SprintLifecycleError::ProjectMismatch {
                story_id,
                project_id: sprint.project_id(),
            });
        }
        story.plan_in(Some(sprint_id), &*self.clock);
        self.store.update_story(&story).await?;
        info!("planned user story into sprint");
        Ok(story)
    }

    /// Returns a user story to the backlog.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::StoryNotFound`] or
    /// [`AccessError::NotMember`].
    #[tracing::instrument(skip(self))]
    pub async fn remove_story(
        &self,
        story_id: StoryId,
        acting: UserId,
    ) -> SprintLifecycleResult<UserStory> {
        let mut story = self.load_story(story_id).await?;
        require_member(&*self.store, story.project_id(), acting).await?;
        story.plan_in(None, &*self.clock);
        self.store.update_story(&story).await?;
        info!("returned user story to backlog");
        Ok(story)
    }

    /// Lists the user stories planned in a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintLifecycleError::NotFound`] or
    /// [`AccessError::NotMember`].
    pub async fn stories_in_sprint(
        &self,
        sprint_id: SprintId,
        acting: UserId,
    ) -> SprintLifecycleResult<Vec<UserStory>> {
        let sprint = self.load_sprint(sprint_id).await?;
        require_member(&*self.store, sprint.project_id(), acting).await?;
        Ok(self.store.list_stories_for_sprint(sprint_id).await?)
    }

    /// Lists the user stories of a project that are in no sprint.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
    pub async fn backlog(
        &self,
        project_id: ProjectId,
        acting: UserId,
    ) -> SprintLifecycleResult<Vec<UserStory>> {
        require_member(&*self.store, project_id, acting).await?;
        Ok(self.store.list_backlog_stories(project_id).await?)
    }

    async fn load_sprint(&self, sprint_id: SprintId) -> SprintLifecycleResult<Sprint> {
        self.store
            .find_sprint(sprint_id)
            .await?
            .ok_or(SprintLifecycleError::NotFound(sprint_id))
    }

    async fn load_story(&self, story_id: StoryId) -> SprintLifecycleResult<UserStory> {
        self.store
            .find_story(story_id)
            .await?
            .ok_or(SprintLifecycleError::StoryNotFound(story_id))
    }

    async fn ensure_name_free(
        &self,
        project_id: ProjectId,
        name: &SprintName,
        current: Option<SprintId>,
    ) -> SprintLifecycleResult<()> {
        let clash = self
            .store
            .find_sprint_by_name(project_id, name)
            .await?
            .is_some_and(|existing| Some(existing.id()) != current);
        if clash {
            return Err(SprintLifecycleError::DuplicateName {
                project_id,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    async fn ensure_no_active_sprint(
        &self,
        project_id: ProjectId,
        current: Option<SprintId>,
    ) -> SprintLifecycleResult<()> {
        let conflict = self
            .store
            .find_active_sprint(project_id)
            .await?
            .is_some_and(|active| Some(active.id()) != current);
        if conflict {
            return Err(SprintLifecycleError::ConflictingActiveSprint { project_id });
        }
        Ok(())
    }
}

/// Maps unique-constraint violations raised by the store to typed errors.
fn constraint_error(err: RepositoryError, sprint: &Sprint) -> SprintLifecycleError {
    if err.violates(constraints::SPRINTS_SINGLE_ACTIVE) {
        SprintLifecycleError::ConflictingActiveSprint {
            project_id: sprint.project_id(),
        }
    } else if err.violates(constraints::SPRINTS_PROJECT_NAME) {
        SprintLifecycleError::DuplicateName {
            project_id: sprint.project_id(),
            name: sprint.name().to_string(),
        }
    } else {
        SprintLifecycleError::Repository(err)
    }
}
