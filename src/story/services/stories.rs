//! User story creation, editing and status changes.

use crate::board::domain::{BoardDomainError, ColumnId, StatusKey};
use crate::board::ports::ColumnRepository;
use crate::identity::domain::UserId;
use crate::identity::ports::UserRepository;
use crate::identity::services::{UserLookupError, resolve_usernames};
use crate::persistence::{RepositoryError, constraints};
use crate::project::domain::{Project, ProjectId};
use crate::project::ports::ProjectRepository;
use crate::project::services::{AccessError, require_member};
use crate::sprint::domain::SprintId;
use crate::sprint::ports::SprintRepository;
use crate::story::domain::{
    Description, NewUserStory, Priority, StoryDomainError, StoryId, StoryRevision, StoryTitle,
    UserStory,
};
use crate::story::ports::StoryRepository;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a user story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    priority: Priority,
    status: Option<String>,
    sprint_id: Option<SprintId>,
    assignees: Vec<String>,
}

impl CreateStoryRequest {
    /// Creates a request for a `MEDIUM` priority story in the `TODO` status.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: None,
            sprint_id: None,
            assignees: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status key; it is normalised before use.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Plans the story into a sprint on creation.
    #[must_use]
    pub const fn with_sprint(mut self, sprint_id: SprintId) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    /// Sets assignee usernames.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }
}

/// Request payload for updating a user story; replaces every editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStoryRequest {
    title: String,
    description: Option<String>,
    priority: Priority,
    status: Option<String>,
    assignees: Vec<String>,
}

impl UpdateStoryRequest {
    /// Creates an update request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: None,
            assignees: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status key; the current status is kept when absent.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets assignee usernames.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }
}

/// Service-level errors for user story operations.
#[derive(Debug, Error)]
pub enum StoryServiceError {
    /// The user story does not exist.
    #[error("user story not found: {0}")]
    NotFound(StoryId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StoryDomainError),
    /// The status key is invalid.
    #[error(transparent)]
    Status(#[from] BoardDomainError),
    /// The project already has a story with this title.
    #[error("a user story titled '{title}' already exists in project {project_id}")]
    DuplicateTitle {
        /// Project holding the clashing story.
        project_id: ProjectId,
        /// Requested title.
        title: String,
    },
    /// An assignee username has no account.
    #[error("unknown user: {0}")]
    UnknownUser(String),
    /// An assignee is not a member of the project.
    #[error("user {user_id} is not a member of project {project_id}")]
    AssigneeNotMember {
        /// Project of the story.
        project_id: ProjectId,
        /// Rejected assignee.
        user_id: UserId,
    },
    /// The requested sprint does not exist in the story's project.
    #[error("sprint {sprint_id} not found in project {project_id}")]
    SprintNotInProject {
        /// Requested sprint.
        sprint_id: SprintId,
        /// Project of the story.
        project_id: ProjectId,
    },
    /// Access check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<UserLookupError> for StoryServiceError {
    fn from(err: UserLookupError) -> Self {
        match err {
            UserLookupError::UnknownUser(name) => Self::UnknownUser(name),
            UserLookupError::Repository(source) => Self::Repository(source),
        }
    }
}

/// Result type for user story operations.
pub type StoryServiceResult<T> = Result<T, StoryServiceError>;

/// User story orchestration service.
#[derive(Clone)]
pub struct UserStoryService<S, C>
where
    S: StoryRepository + ProjectRepository + UserRepository + SprintRepository + ColumnRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> UserStoryService<S, C>
where
    S: StoryRepository + ProjectRepository + UserRepository + SprintRepository + ColumnRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user story service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a user story in a project `acting` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotMember`],
    /// [`StoryServiceError::DuplicateTitle`], an assignee error, or
    /// [`StoryServiceError::SprintNotInProject`].
    #[tracing::instrument(skip(self, request), fields(project_id = %request.project_id))]
    pub async fn create(
        &self,
        request: CreateStoryRequest,
        acting: UserId,
    ) -> StoryServiceResult<UserStory> {
        let project = require_member(&*self.store, request.project_id, acting).await?;
        let title = StoryTitle::new(request.title)?;
        let description = Description::optional(request.description)
            .map_err(StoryDomainError::from)?;
        let status = status_or_todo(request.status.as_deref())?;
        self.ensure_title_free(project.id(), &title, None).await?;
        let assignees = self.resolve_assignees(&project, &request.assignees).await?;
        if let Some(sprint_id) = request.sprint_id {
            self.ensure_sprint_in_project(sprint_id, project.id())
                .await?;
        }
        let column_id = self.column_for(project.id(), &status).await?;
        let story = UserStory::new(
            NewUserStory {
                project_id: project.id(),
                title,
                description,
                priority: request.priority,
                status,
                column_id,
                sprint_id: request.sprint_id,
                assignees,
            },
            &*self.clock,
        );
        self.store
            .store_story(&story)
            .await
            .map_err(|err| duplicate_title_or(err, &story))?;
        info!(story_id = %story.id(), "created user story");
        Ok(story)
    }

    /// Lists the user stories of a project.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
        acting: UserId,
    ) -> StoryServiceResult<Vec<UserStory>> {
        require_member(&*self.store, project_id, acting).await?;
        Ok(self.store.list_stories_for_project(project_id).await?)
    }

    /// Loads a user story visible to `acting`.
    ///
    /// # Errors
    ///
    /// Returns [`StoryServiceError::NotFound`] or [`AccessError::NotMember`].
    pub async fn get(&self, story_id: StoryId, acting: UserId) -> StoryServiceResult<UserStory> {
        let (story, _) = self.load_accessible(story_id, acting).await?;
        Ok(story)
    }

    /// Replaces the editable fields of a user story.
    ///
    /// # Errors
    ///
    /// Returns [`StoryServiceError::NotFound`], [`AccessError::NotMember`],
    /// [`StoryServiceError::DuplicateTitle`] when another story of the project
    /// has the new title, or an assignee error.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        story_id: StoryId,
        request: UpdateStoryRequest,
        acting: UserId,
    ) -> StoryServiceResult<UserStory> {
        let (mut story, project) = self.load_accessible(story_id, acting).await?;
        let title = StoryTitle::new(request.title)?;
        let description = Description::optional(request.description)
            .map_err(StoryDomainError::from)?;
        let status = match request.status.as_deref() {
            Some(raw) => StatusKey::normalise(raw)?,
            None => story.status().clone(),
        };
        self.ensure_title_free(project.id(), &title, Some(story_id))
            .await?;
        let assignees = self.resolve_assignees(&project, &request.assignees).await?;
        let column_id = self.column_for(project.id(), &status).await?;
        story.revise(
            StoryRevision {
                title,
                description,
                priority: request.priority,
                status,
                column_id,
                assignees,
            },
            &*self.clock,
        );
        self.store
            .update_story(&story)
            .await
            .map_err(|err| duplicate_title_or(err, &story))?;
        info!("updated user story");
        Ok(story)
    }

    /// Deletes a user story and its tasks; only the project owner may do so.
    ///
    /// # Errors
    ///
    /// Returns [`StoryServiceError::NotFound`], [`AccessError::NotMember`],
    /// or [`AccessError::NotOwner`].
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, story_id: StoryId, acting: UserId) -> StoryServiceResult<()> {
        let (_, project) = self.load_accessible(story_id, acting).await?;
        if !project.is_owner(acting) {
            return Err(AccessError::NotOwner {
                project_id: project.id(),
                user_id: acting,
            }
            .into());
        }
        self.store.delete_story_with_tasks(story_id).await?;
        info!("deleted user story");
        Ok(())
    }

    /// Moves a user story to `status`, linking the matching board column.
    ///
    /// # Errors
    ///
    /// Returns [`StoryServiceError::NotFound`], [`AccessError::NotMember`],
    /// or [`StoryServiceError::Status`] for an invalid status key.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        story_id: StoryId,
        status: &str,
        acting: UserId,
    ) -> StoryServiceResult<UserStory> {
        let (mut story, project) = self.load_accessible(story_id, acting).await?;
        let key = StatusKey::normalise(status)?;
        let column_id = self.column_for(project.id(), &key).await?;
        story.move_to(key, column_id, &*self.clock);
        self.store.update_story(&story).await?;
        info!(status = %story.status(), "moved user story");
        Ok(story)
    }

    async fn load_accessible(
        &self,
        story_id: StoryId,
        acting: UserId,
    ) -> StoryServiceResult<(UserStory, Project)> {
        let story = self
            .store
            .find_story(story_id)
            .await?
            .ok_or(StoryServiceError::NotFound(story_id))?;
        let project = require_member(&*self.store, story.project_id(), acting).await?;
        Ok((story, project))
    }

    async fn ensure_title_free(
        &self,
        project_id: ProjectId,
        title: &StoryTitle,
        current: Option<StoryId>,
    ) -> StoryServiceResult<()> {
        let clash = self
            .store
            .find_story_by_title(project_id, title)
            .await?
            .is_some_and(|existing| Some(existing.id()) != current);
        if clash {
            return Err(StoryServiceError::DuplicateTitle {
                project_id,
                title: title.to_string(),
            });
        }
        Ok(())
    }

    async fn resolve_assignees(
        &self,
        project: &Project,
        usernames: &[String],
    ) -> StoryServiceResult<BTreeSet<UserId>> {
        let assignees = resolve_usernames(&*self.store, usernames).await?;
        if let Some(outsider) = assignees.iter().find(|id| !project.is_member(**id)) {
            return Err(StoryServiceError::AssigneeNotMember {
                project_id: project.id(),
                user_id: *outsider,
            });
        }
        Ok(assignees)
    }

    async fn ensure_sprint_in_project(
        &self,
        sprint_id: SprintId,
        project_id: ProjectId,
    ) -> StoryServiceResult<()> {
        let found = self
            .store
            .find_sprint(sprint_id)
            .await?
            .is_some_and(|sprint| sprint.project_id() == project_id);
        if !found {
            return Err(StoryServiceError::SprintNotInProject {
                sprint_id,
                project_id,
            });
        }
        Ok(())
    }

    async fn column_for(
        &self,
        project_id: ProjectId,
        status: &StatusKey,
    ) -> StoryServiceResult<Option<ColumnId>> {
        Ok(self
            .store
            .find_column_by_status(project_id, status)
            .await?
            .map(|column| column.id()))
    }
}

fn status_or_todo(raw: Option<&str>) -> Result<StatusKey, BoardDomainError> {
    match raw {
        Some(value) if !value.trim().is_empty() => StatusKey::normalise(value),
        _ => Ok(StatusKey::todo()),
    }
}

fn duplicate_title_or(err: RepositoryError, story: &UserStory) -> StoryServiceError {
    if err.violates(constraints::STORIES_PROJECT_TITLE) {
        StoryServiceError::DuplicateTitle {
            project_id: story.project_id(),
            title: story.title().to_string(),
        }
    } else {
        StoryServiceError::Repository(err)
    }
}
