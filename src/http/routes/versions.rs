//! Release versions and their user stories.

use super::stories::{StoryResponse, story_list};
use super::{Created, created, with_optional};
use crate::http::{ApiError, AppClock, AuthenticatedUser, Json, Path, SharedState};
use crate::persistence::Store;
use crate::project::domain::ProjectId;
use crate::release::domain::{Version, VersionId, VersionStatus};
use crate::release::services::VersionRequest;
use crate::story::domain::StoryId;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VersionFieldsBody {
    title: String,
    version_number: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    release_date: Option<NaiveDate>,
}

impl VersionFieldsBody {
    fn into_request(self) -> VersionRequest {
        let request = with_optional(
            VersionRequest::new(self.title, self.version_number),
            self.description,
            VersionRequest::with_description,
        );
        with_optional(request, self.release_date, VersionRequest::with_release_date)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateVersionBody {
    project_id: ProjectId,
    #[serde(flatten)]
    fields: VersionFieldsBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VersionStatusBody {
    status: VersionStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VersionResponse {
    id: VersionId,
    title: String,
    description: Option<String>,
    version_number: String,
    release_date: Option<NaiveDate>,
    status: VersionStatus,
    project_id: ProjectId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&Version> for VersionResponse {
    fn from(version: &Version) -> Self {
        Self {
            id: version.id(),
            title: version.title().to_string(),
            description: version.description().map(str::to_owned),
            version_number: version.number().to_string(),
            release_date: version.release_date(),
            status: version.status(),
            project_id: version.project_id(),
            created_at: version.created_at(),
            updated_at: version.updated_at(),
        }
    }
}

pub(crate) async fn create<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreateVersionBody>,
) -> Result<Created<VersionResponse>, ApiError> {
    let version = state
        .releases
        .create(body.project_id, body.fields.into_request(), user.id())
        .await?;
    Ok(created(VersionResponse::from(&version)))
}

pub(crate) async fn list_for_project<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<VersionResponse>>, ApiError> {
    let versions = state
        .releases
        .list_for_project(project_id, user.id())
        .await?;
    Ok(Json(versions.iter().map(VersionResponse::from).collect()))
}

pub(crate) async fn get<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<VersionId>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version = state.releases.get(id, user.id()).await?;
    Ok(Json(VersionResponse::from(&version)))
}

pub(crate) async fn update<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<VersionId>,
    Json(body): Json<VersionFieldsBody>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version = state
        .releases
        .update(id, body.into_request(), user.id())
        .await?;
    Ok(Json(VersionResponse::from(&version)))
}

pub(crate) async fn update_status<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<VersionId>,
    Json(body): Json<VersionStatusBody>,
) -> Result<Json<VersionResponse>, ApiError> {
    let version = state
        .releases
        .update_status(id, body.status, user.id())
        .await?;
    Ok(Json(VersionResponse::from(&version)))
}

pub(crate) async fn delete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<VersionId>,
) -> Result<StatusCode, ApiError> {
    state.releases.delete(id, user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn assign_story<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, story_id)): Path<(VersionId, StoryId)>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state.releases.assign_story(id, story_id, user.id()).await?;
    Ok(Json(StoryResponse::from(&story)))
}

pub(crate) async fn remove_story<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((id, story_id)): Path<(VersionId, StoryId)>,
) -> Result<Json<StoryResponse>, ApiError> {
    let story = state.releases.remove_story(id, story_id, user.id()).await?;
    Ok(Json(StoryResponse::from(&story)))
}

pub(crate) async fn list_stories<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<VersionId>,
) -> Result<Json<Vec<StoryResponse>>, ApiError> {
    let stories = state.releases.stories_in_version(id, user.id()).await?;
    Ok(story_list(&stories))
}
