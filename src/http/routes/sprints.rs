//! Sprint CRUD, lifecycle transitions and sprint planning.

use super::stories::{StoryResponse, story_list};
use super::{Created, created, with_optional};
use crate::http::{ApiError, AppClock, AuthenticatedUser, Json, Path, SharedState};
use crate::persistence::Store;
use crate::project::domain::ProjectId;
use crate::sprint::domain::{Sprint, SprintId, SprintStatus};
use crate::sprint::services::{CreateSprintRequest, UpdateSprintRequest};
use crate::story::domain::StoryId;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSprintBody {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    status: Option<SprintStatus>,
    project_id: ProjectId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateSprintBody {
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SprintResponse {
    id: SprintId,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: SprintStatus,
    project_id: ProjectId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Sprint> for SprintResponse {
    fn from(sprint: &Sprint) -> Self {
        Self {
            id: sprint.id(),
            name: sprint.name().to_string(),
            start_date: sprint.schedule().start(),
            end_date: sprint.schedule().end(),
            status: sprint.status(),
            project_id: sprint.project_id(),
            created_at: sprint.created_at(),
            updated_at: sprint.updated_at(),
        }
    }
}

pub(crate) async fn create<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreateSprintBody>,
) -> Result<Created<SprintResponse>, ApiError> {
    let request = with_optional(
        CreateSprintRequest::new(body.project_id, body.name, body.start_date, body.end_date),
        body.status,
        CreateSprintRequest::with_status,
    );
    let sprint = state.sprints.create(request, user.id()).await?;
    Ok(created(SprintResponse::from(&sprint)))
}

pub(crate) async fn list_for_project<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<SprintResponse>>, ApiError> {
    let sprints = state
        .sprints
        .list_for_project(project_id, user.id())
        .await?;
    Ok(Json(sprints.iter().map(SprintResponse::from).collect()))
}

pub(crate) async fn backlog<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<StoryResponse>>, ApiError> {
    let stories = state.sprints.backlog(project_id, user.id()).await?;
    Ok(story_list(&stories))
}

pub(crate) async fn get<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<SprintId>,
) -> Result<Json<SprintResponse>, ApiError> {
    let sprint = state.sprints.get(id, user.id()).await?;
    Ok(Json(SprintResponse::from(&sprint)))
}

pub(crate) async fn update<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<SprintId>,
    Json(body): Json<UpdateSprintBody>,
) -> Result<Json<SprintResponse>, ApiError> {
    let request = UpdateSprintRequest::new(body.name, body.start_date, body.end_date);
    let sprint = state.sprints.update(id, request, user.id()).await?;
    Ok(Json(SprintResponse::from(&sprint)))
}

pub(crate) async fn delete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<SprintId>,
) -> Result<StatusCode, ApiError> {
    state.sprints.delete(id, user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn start<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<SprintId>,
) -> Result<Json<SprintResponse>, ApiError> {
    let sprint = state.sprints.start(id, user.id()).await?;
    Ok(Json(SprintResponse::from(&sprint)))
}

pub(crate) async fn complete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<SprintId>,
) -> Result<Json<SprintResponse>, ApiError> {
    let sprint = state.sprints.complete(id, user.id()).await?;
    Ok(Json(SprintResponse::from(&sprint)))
}

pub(crate) async fn assign_story<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, story_id)): Path<(SprintId, StoryId)>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state.sprints.assign_story(id, story_id, user.id()).await?;
    Ok(Json(StoryResponse::from(&story)))
}

pub(crate) async fn list_stories<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<SprintId>,
) -> Result<Json<Vec<StoryResponse>>, ApiError> {
    let stories = state.sprints.stories_in_sprint(id, user.id()).await?;
    Ok(story_list(&stories))
}

pub(crate) async fn remove_story<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(story_id): Path<StoryId>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state.sprints.remove_story(story_id, user.id()).await?;
    Ok(Json(StoryResponse::from(&story)))
}
