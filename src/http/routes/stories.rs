//! User story CRUD and status changes.

use super::{Created, created, with_optional};
use crate::board::domain::ColumnId;
use crate::http::{ApiError, AppClock, AuthenticatedUser, Json, Path, SharedState};
use crate::identity::domain::UserId;
use crate::persistence::Store;
use crate::project::domain::ProjectId;
use crate::release::domain::VersionId;
use crate::sprint::domain::SprintId;
use crate::story::domain::{Priority, StoryId, UserStory};
use crate::story::services::{CreateStoryRequest, UpdateStoryRequest};
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateStoryBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    status: Option<String>,
    project_id: ProjectId,
    #[serde(default)]
    sprint_id: Option<SprintId>,
    #[serde(default)]
    assigned_to_usernames: Vec<String>,
}

impl CreateStoryBody {
    fn into_request(self) -> CreateStoryRequest {
        let request = CreateStoryRequest::new(self.project_id, self.title)
            .with_assignees(self.assigned_to_usernames);
        let described = with_optional(
            request,
            self.description,
            CreateStoryRequest::with_description,
        );
        let prioritised = with_optional(described, self.priority, CreateStoryRequest::with_priority);
        let placed = with_optional(prioritised, self.sprint_id, CreateStoryRequest::with_sprint);
        with_optional(placed, self.status, CreateStoryRequest::with_status)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateStoryBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    assigned_to_usernames: Vec<String>,
}

impl UpdateStoryBody {
    fn into_request(self) -> UpdateStoryRequest {
        let request =
            UpdateStoryRequest::new(self.title).with_assignees(self.assigned_to_usernames);
        let described = with_optional(
            request,
            self.description,
            UpdateStoryRequest::with_description,
        );
        let prioritised = with_optional(described, self.priority, UpdateStoryRequest::with_priority);
        with_optional(prioritised, self.status, UpdateStoryRequest::with_status)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoryResponse {
    id: StoryId,
    title: String,
    description: Option<String>,
    priority: Priority,
    status: String,
    project_id: ProjectId,
    sprint_id: Option<SprintId>,
    version_id: Option<VersionId>,
    kanban_column_id: Option<ColumnId>,
    assignee_ids: Vec<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&UserStory> for StoryResponse {
    fn from(story: &UserStory) -> Self {
        Self {
            id: story.id(),
            title: story.title().to_string(),
            description: story.description().map(str::to_owned),
            priority: story.priority(),
            status: story.status().to_string(),
            project_id: story.project_id(),
            sprint_id: story.sprint_id(),
            version_id: story.version_id(),
            kanban_column_id: story.column_id(),
            assignee_ids: story.assignees().iter().copied().collect(),
            created_at: story.created_at(),
            updated_at: story.updated_at(),
        }
    }
}

pub(crate) fn story_list(stories: &[UserStory]) -> Json<Vec<StoryResponse>> {
    Json(stories.iter().map(StoryResponse::from).collect())
}

pub(crate) async fn create<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreateStoryBody>,
) -> Result<Created<StoryResponse>, ApiError> {
    let story = state.stories.create(body.into_request(), user.id()).await?;
    Ok(created(StoryResponse::from(&story)))
}

pub(crate) async fn list_for_project<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<StoryResponse>>, ApiError> {
    let stories = state
        .stories
        .list_for_project(project_id, user.id())
        .await?;
    Ok(story_list(&stories))
}

pub(crate) async fn get<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<StoryId>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state.stories.get(id, user.id()).await?;
    Ok(Json(StoryResponse::from(&story)))
}

pub(crate) async fn update<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<StoryId>,
    Json(body): Json<UpdateStoryBody>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state
        .stories
        .update(id, body.into_request(), user.id())
        .await?;
    Ok(Json(StoryResponse::from(&story)))
}

pub(crate) async fn update_status<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<StoryId>,
    Json(body): Json<StatusBody>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state
        .stories
        .update_status(id, &body.status, user.id())
        .await?;
    Ok(Json(StoryResponse::from(&story)))
}

pub(crate) async fn delete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<StoryId>,
) -> Result<StatusCode, ApiError> {
    state.stories.delete(id, user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
