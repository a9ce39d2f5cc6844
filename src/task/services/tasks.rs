//! Task creation and editing within user stories.

use crate::identity::domain::{UserId, Username};
use crate::identity::ports::UserRepository;
use crate::persistence::{RepositoryError, constraints};
use crate::project::domain::Project;
use crate::project::ports::ProjectRepository;
use crate::project::services::{AccessError, require_member};
use crate::story::domain::{Description, Priority, StoryId};
use crate::story::ports::StoryRepository;
use crate::task::domain::{
    NewTask, Task, TaskDomainError, TaskId, TaskRevision, TaskStatus, TaskTitle,
};
use crate::task::ports::TaskRepository;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    story_id: StoryId,
    fields: TaskFields,
}

impl CreateTaskRequest {
    /// Creates a request for a `TODO` task with `MEDIUM` priority.
    #[must_use]
    pub fn new(story_id: StoryId, title: impl Into<String>) -> Self {
        Self {
            story_id,
            fields: TaskFields::titled(title.into()),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.fields.priority = priority;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.fields.status = status;
        self
    }

    /// Assigns the task to a project member by username.
    #[must_use]
    pub fn with_assignee(mut self, username: impl Into<String>) -> Self {
        self.fields.assignee = Some(username.into());
        self
    }
}

/// Request payload for updating a task; replaces every editable field.
///
/// Leaving the assignee unset clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    fields: TaskFields,
}

impl UpdateTaskRequest {
    /// Creates an update request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            fields: TaskFields::titled(title.into()),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.fields.priority = priority;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.fields.status = status;
        self
    }

    /// Assigns the task to a project member by username.
    #[must_use]
    pub fn with_assignee(mut self, username: impl Into<String>) -> Self {
        self.fields.assignee = Some(username.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskFields {
    title: String,
    description: Option<String>,
    priority: Priority,
    status: TaskStatus,
    assignee: Option<String>,
}

impl TaskFields {
    fn titled(title: String) -> Self {
        Self {
            title,
            description: None,
            priority: Priority::default(),
            status: TaskStatus::default(),
            assignee: None,
        }
    }
}

struct ValidatedFields {
    title: TaskTitle,
    description: Option<Description>,
    priority: Priority,
    status: TaskStatus,
    assignee_id: Option<UserId>,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The parent user story does not exist.
    #[error("user story not found: {0}")]
    StoryNotFound(StoryId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The user story already has a task with this title.
    #[error("a task titled '{title}' already exists in user story {story_id}")]
    DuplicateTitle {
        /// Story holding the clashing task.
        story_id: StoryId,
        /// Requested title.
        title: String,
    },
    /// The assignee username has no account.
    #[error("unknown user: {0}")]
    UnknownUser(String),
    /// The assignee is not a member of the project.
    #[error("user '{0}' is not a member of the project")]
    AssigneeNotMember(String),
    /// Access check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for task operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<S, C>
where
    S: TaskRepository + StoryRepository + ProjectRepository + UserRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskService<S, C>
where
    S: TaskRepository + StoryRepository + ProjectRepository + UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task inside a user story of a project `acting` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::StoryNotFound`], [`AccessError::NotMember`],
    /// [`TaskServiceError::DuplicateTitle`], or an assignee error.
    #[tracing::instrument(skip(self, request), fields(story_id = %request.story_id))]
    pub async fn create(&self, request: CreateTaskRequest, acting: UserId) -> TaskServiceResult<Task> {
        let story_id = request.story_id;
        let project = self.story_project(story_id, acting).await?;
        let fields = self.validate(&project, request.fields).await?;
        self.ensure_title_free(story_id, &fields.title, None).await?;
        let task = Task::new(
            NewTask {
                story_id,
                title: fields.title,
                description: fields.description,
                priority: fields.priority,
                status: fields.status,
                assignee_id: fields.assignee_id,
            },
            &*self.clock,
        );
        self.store
            .store_task(&task)
            .await
            .map_err(|err| duplicate_title_or(err, &task))?;
        info!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Loads a task visible to `acting`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or [`AccessError::NotMember`].
    pub async fn get(&self, task_id: TaskId, acting: UserId) -> TaskServiceResult<Task> {
        let (task, _) = self.load_accessible(task_id, acting).await?;
        Ok(task)
    }

    /// Lists the tasks of a user story.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::StoryNotFound`] or [`AccessError::NotMember`].
    pub async fn list_for_story(
        &self,
        story_id: StoryId,
        acting: UserId,
    ) -> TaskServiceResult<Vec<Task>> {
        self.story_project(story_id, acting).await?;
        Ok(self.store.list_tasks_for_story(story_id).await?)
    }

    /// Replaces the editable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`], [`AccessError::NotMember`],
    /// [`TaskServiceError::DuplicateTitle`] when a sibling task has the new
    /// title, or an assignee error.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
        acting: UserId,
    ) -> TaskServiceResult<Task> {
        let (mut task, project) = self.load_accessible(task_id, acting).await?;
        let fields = self.validate(&project, request.fields).await?;
        self.ensure_title_free(task.story_id(), &fields.title, Some(task_id))
            .await?;
        task.revise(
            TaskRevision {
                title: fields.title,
                description: fields.description,
                priority: fields.priority,
                status: fields.status,
                assignee_id: fields.assignee_id,
            },
            &*self.clock,
        );
        self.store
            .update_task(&task)
            .await
            .map_err(|err| duplicate_title_or(err, &task))?;
        info!(status = %task.status(), "updated task");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or [`AccessError::NotMember`].
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, task_id: TaskId, acting: UserId) -> TaskServiceResult<()> {
        self.load_accessible(task_id, acting).await?;
        self.store.delete_task(task_id).await?;
        info!("deleted task");
        Ok(())
    }

    async fn story_project(&self, story_id: StoryId, acting: UserId) -> TaskServiceResult<Project> {
        let story = self
            .store
            .find_story(story_id)
            .await?
            .ok_or(TaskServiceError::StoryNotFound(story_id))?;
        Ok(require_member(&*self.store, story.project_id(), acting).await?)
    }

    async fn load_accessible(
        &self,
        task_id: TaskId,
        acting: UserId,
    ) -> TaskServiceResult<(Task, Project)> {
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))?;
        let project = self.story_project(task.story_id(), acting).await?;
        Ok((task, project))
    }

    async fn validate(
        &self,
        project: &Project,
        fields: TaskFields,
    ) -> TaskServiceResult<ValidatedFields> {
        let title = TaskTitle::new(fields.title)?;
        let description =
            Description::optional(fields.description).map_err(TaskDomainError::from)?;
        let assignee_id = match fields.assignee.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(self.resolve_assignee(project, name).await?),
            _ => None,
        };
        Ok(ValidatedFields {
            title,
            description,
            priority: fields.priority,
            status: fields.status,
            assignee_id,
        })
    }

    async fn resolve_assignee(&self, project: &Project, name: &str) -> TaskServiceResult<UserId> {
        let username =
            Username::new(name).map_err(|_| TaskServiceError::UnknownUser(name.to_owned()))?;
        let user = self
            .store
            .find_user_by_username(&username)
            .await?
            .ok_or_else(|| TaskServiceError::UnknownUser(name.to_owned()))?;
        if !project.is_member(user.id()) {
            return Err(TaskServiceError::AssigneeNotMember(name.to_owned()));
        }
        Ok(user.id())
    }

    async fn ensure_title_free(
        &self,
        story_id: StoryId,
        title: &TaskTitle,
        current: Option<TaskId>,
    ) -> TaskServiceResult<()> {
        let clash = self
            .store
            .find_task_by_title(story_id, title)
            .await?
            .is_some_and(|existing| Some(existing.id()) != current);
        if clash {
            return Err(TaskServiceError::DuplicateTitle {
                story_id,
                title: title.to_string(),
            });
        }
        Ok(())
    }
}

fn duplicate_title_or(err: RepositoryError, task: &Task) -> TaskServiceError {
    if err.violates(constraints::TASKS_STORY_TITLE) {
        TaskServiceError::DuplicateTitle {
            story_id: task.story_id(),
            title: task.title().to_string(),
        }
    } else {
        TaskServiceError::Repository(err)
    }
}
