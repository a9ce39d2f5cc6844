//! Project CRUD.

use super::{Created, created, with_optional};
use crate::http::{ApiError, AppClock, AppState, AuthenticatedUser, Json, Path, SharedState};
use crate::identity::domain::UserId;
use crate::persistence::Store;
use crate::project::domain::{Project, ProjectId};
use crate::project::services::CreateProjectRequest;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    members: Vec<String>,
}

impl ProjectBody {
    fn into_request(self) -> CreateProjectRequest {
        with_optional(
            CreateProjectRequest::new(self.name).with_members(self.members),
            self.description,
            CreateProjectRequest::with_description,
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemberResponse {
    id: UserId,
    username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectResponse {
    id: ProjectId,
    name: String,
    description: Option<String>,
    owner: MemberResponse,
    members: Vec<MemberResponse>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Usernames keyed by account id, loaded once per request.
struct Directory(BTreeMap<UserId, String>);

impl Directory {
    async fn load<S: Store, C: AppClock>(state: &AppState<S, C>) -> Result<Self, ApiError> {
        let users = state.auth.list_users().await?;
        Ok(Self(
            users
                .into_iter()
                .map(|user| (user.id(), user.username().to_string()))
                .collect(),
        ))
    }

    fn member(&self, id: UserId) -> MemberResponse {
        MemberResponse {
            id,
            username: self.0.get(&id).cloned().unwrap_or_default(),
        }
    }

    fn project(&self, project: &Project) -> ProjectResponse {
        ProjectResponse {
            id: project.id(),
            name: project.name().to_string(),
            description: project.description().map(str::to_owned),
            owner: self.member(project.owner_id()),
            members: project
                .members()
                .iter()
                .map(|id| self.member(*id))
                .collect(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

pub(crate) async fn create<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<ProjectBody>,
) -> Result<Created<ProjectResponse>, ApiError> {
    let project = state.projects.create(body.into_request(), user.id()).await?;
    let directory = Directory::load(&state).await?;
    Ok(created(directory.project(&project)))
}

pub(crate) async fn list_mine<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = state.projects.list_for_user(user.id()).await?;
    let directory = Directory::load(&state).await?;
    Ok(Json(
        projects
            .iter()
            .map(|project| directory.project(project))
            .collect(),
    ))
}

pub(crate) async fn get<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<ProjectId>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state.projects.get(id, user.id()).await?;
    let directory = Directory::load(&state).await?;
    Ok(Json(directory.project(&project)))
}

pub(crate) async fn update<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<ProjectId>,
    Json(body): Json<ProjectBody>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state
        .projects
        .update(id, body.into_request(), user.id())
        .await?;
    let directory = Directory::load(&state).await?;
    Ok(Json(directory.project(&project)))
}

pub(crate) async fn delete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<ProjectId>,
) -> Result<StatusCode, ApiError> {
    state.projects.delete(id, user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
