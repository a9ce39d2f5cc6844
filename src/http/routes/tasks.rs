//! Task CRUD within user stories.

use super::{Created, created, with_optional};
use crate::http::{ApiError, AppClock, AuthenticatedUser, Json, Path, SharedState};
use crate::identity::domain::UserId;
use crate::persistence::Store;
use crate::story::domain::{Priority, StoryId};
use crate::task::domain::{Task, TaskId, TaskStatus};
use crate::task::services::{CreateTaskRequest, UpdateTaskRequest};
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Editable task fields shared by create and update bodies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskFieldsBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    status: Option<TaskStatus>,
    #[serde(default)]
    assigned_to_username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTaskBody {
    user_story_id: StoryId,
    #[serde(flatten)]
    fields: TaskFieldsBody,
}

impl CreateTaskBody {
    fn into_request(self) -> CreateTaskRequest {
        let fields = self.fields;
        let request = with_optional(
            CreateTaskRequest::new(self.user_story_id, fields.title),
            fields.description,
            CreateTaskRequest::with_description,
        );
        let prioritised = with_optional(request, fields.priority, CreateTaskRequest::with_priority);
        let statused = with_optional(prioritised, fields.status, CreateTaskRequest::with_status);
        with_optional(
            statused,
            fields.assigned_to_username,
            CreateTaskRequest::with_assignee,
        )
    }
}

impl TaskFieldsBody {
    fn into_request(self) -> UpdateTaskRequest {
        let request = with_optional(
            UpdateTaskRequest::new(self.title),
            self.description,
            UpdateTaskRequest::with_description,
        );
        let prioritised = with_optional(request, self.priority, UpdateTaskRequest::with_priority);
        let statused = with_optional(prioritised, self.status, UpdateTaskRequest::with_status);
        with_optional(
            statused,
            self.assigned_to_username,
            UpdateTaskRequest::with_assignee,
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskResponse {
    id: TaskId,
    title: String,
    description: Option<String>,
    priority: Priority,
    status: TaskStatus,
    user_story_id: StoryId,
    assignee_id: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().map(str::to_owned),
            priority: task.priority(),
            status: task.status(),
            user_story_id: task.story_id(),
            assignee_id: task.assignee_id(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

pub(crate) async fn create<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreateTaskBody>,
) -> Result<Created<TaskResponse>, ApiError> {
    let task = state.tasks.create(body.into_request(), user.id()).await?;
    Ok(created(TaskResponse::from(&task)))
}

pub(crate) async fn list_for_story<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(story_id): Path<StoryId>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.tasks.list_for_story(story_id, user.id()).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

pub(crate) async fn get<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks.get(id, user.id()).await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(crate) async fn update<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<TaskId>,
    Json(body): Json<TaskFieldsBody>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state
        .tasks
        .update(id, body.into_request(), user.id())
        .await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(crate) async fn delete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<TaskId>,
) -> Result<StatusCode, ApiError> {
    state.tasks.delete(id, user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
