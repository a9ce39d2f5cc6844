//! Project creation, membership edits and deletion.

use super::access::{AccessError, require_member};
use crate::board::domain::KanbanColumn;
use crate::identity::domain::UserId;
use crate::identity::ports::UserRepository;
use crate::identity::services::{UserLookupError, resolve_usernames};
use crate::persistence::{RepositoryError, constraints};
use crate::project::domain::{NewProject, Project, ProjectDomainError, ProjectId, ProjectName};
use crate::project::ports::ProjectRepository;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    members: Vec<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            members: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets member usernames; the owner is always added.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = String>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Request payload for updating a project; replaces every field.
pub type UpdateProjectRequest = CreateProjectRequest;

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// A member username has no account.
    #[error("unknown user: {0}")]
    UnknownUser(String),
    /// The owner already has a project with this name.
    #[error("a project named '{0}' already exists for this owner")]
    DuplicateName(String),
    /// Access check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<UserLookupError> for ProjectServiceError {
    fn from(err: UserLookupError) -> Self {
        match err {
            UserLookupError::UnknownUser(name) => Self::UnknownUser(name),
            UserLookupError::Repository(source) => Self::Repository(source),
        }
    }
}

/// Result type for project operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<S, C>
where
    S: ProjectRepository + UserRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ProjectService<S, C>
where
    S: ProjectRepository + UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a project owned by `acting` with the default board columns.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::UnknownUser`] for an unknown member and
    /// [`ProjectServiceError::DuplicateName`] when `acting` already owns a
    /// project with the same name.
    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        request: CreateProjectRequest,
        acting: UserId,
    ) -> ProjectServiceResult<Project> {
        let name = ProjectName::new(request.name)?;
        let members = resolve_usernames(&*self.store, &request.members).await?;
        if self
            .store
            .find_project_by_owner_and_name(acting, &name)
            .await?
            .is_some()
        {
            return Err(ProjectServiceError::DuplicateName(name.to_string()));
        }
        let project = Project::new(
            NewProject {
                name,
                description: request.description,
                owner_id: acting,
                members,
            },
            &*self.clock,
        );
        let columns = KanbanColumn::defaults_for(project.id());
        self.store
            .store_project(&project, &columns)
            .await
            .map_err(|err| duplicate_name_or(err, &project))?;
        info!(project_id = %project.id(), "created project");
        Ok(project)
    }

    /// Loads a project visible to `acting`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
    pub async fn get(&self, project_id: ProjectId, acting: UserId) -> ProjectServiceResult<Project> {
        Ok(require_member(&*self.store, project_id, acting).await?)
    }

    /// Lists the projects `acting` owns or is a member of.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] on storage failure.
    pub async fn list_for_user(&self, acting: UserId) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.store.list_projects_for_member(acting).await?)
    }

    /// Replaces the name, description and members of a project.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotMember`] or [`AccessError::NotOwner`] on
    /// access failure, and [`ProjectServiceError::DuplicateName`] when the
    /// owner has another project with the new name.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        project_id: ProjectId,
        request: UpdateProjectRequest,
        acting: UserId,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.require_owning_member(project_id, acting).await?;
        let name = ProjectName::new(request.name)?;
        let members = resolve_usernames(&*self.store, &request.members).await?;
        let clash = self
            .store
            .find_project_by_owner_and_name(project.owner_id(), &name)
            .await?
            .is_some_and(|other| other.id() != project_id);
        if clash {
            return Err(ProjectServiceError::DuplicateName(name.to_string()));
        }
        project.revise(name, request.description, &*self.clock);
        project.replace_members(members, &*self.clock);
        self.store
            .update_project(&project)
            .await
            .map_err(|err| duplicate_name_or(err, &project))?;
        info!("updated project");
        Ok(project)
    }

    /// Deletes a project and everything inside it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotMember`] or [`AccessError::NotOwner`].
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, project_id: ProjectId, acting: UserId) -> ProjectServiceResult<()> {
        self.require_owning_member(project_id, acting).await?;
        self.store.delete_project_cascade(project_id).await?;
        info!("deleted project");
        Ok(())
    }

    async fn require_owning_member(
        &self,
        project_id: ProjectId,
        acting: UserId,
    ) -> ProjectServiceResult<Project> {
        let project = require_member(&*self.store, project_id, acting).await?;
        if !project.is_owner(acting) {
            return Err(AccessError::NotOwner {
                project_id,
                user_id: acting,
            }
            .into());
        }
        Ok(project)
    }
}

fn duplicate_name_or(err: RepositoryError, project: &Project) -> ProjectServiceError {
    if err.violates(constraints::PROJECTS_OWNER_NAME) {
        ProjectServiceError::DuplicateName(project.name().to_string())
    } else {
        ProjectServiceError::Repository(err)
    }
}
