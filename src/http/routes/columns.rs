//! Kanban column management.

use super::{Created, created, with_optional};
use crate::board::domain::{ColumnId, KanbanColumn};
use crate::board::services::{CreateColumnRequest, UpdateColumnRequest};
use crate::http::{ApiError, AppClock, AuthenticatedUser, Json, Path, SharedState};
use crate::persistence::Store;
use crate::project::domain::ProjectId;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateColumnBody {
    name: String,
    status: String,
    #[serde(default)]
    order: Option<i32>,
    project_id: ProjectId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateColumnBody {
    name: String,
    #[serde(default)]
    order: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ColumnResponse {
    id: ColumnId,
    name: String,
    status: String,
    order: i32,
    project_id: ProjectId,
    is_default: bool,
}

impl From<&KanbanColumn> for ColumnResponse {
    fn from(column: &KanbanColumn) -> Self {
        Self {
            id: column.id(),
            name: column.name().to_string(),
            status: column.status().to_string(),
            order: column.order(),
            project_id: column.project_id(),
            is_default: column.is_default(),
        }
    }
}

pub(crate) async fn create<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(body): Json<CreateColumnBody>,
) -> Result<Created<ColumnResponse>, ApiError> {
    let request = with_optional(
        CreateColumnRequest::new(body.project_id, body.name, body.status),
        body.order,
        CreateColumnRequest::with_order,
    );
    let column = state.board.create(request, user.id()).await?;
    Ok(created(ColumnResponse::from(&column)))
}

pub(crate) async fn list_for_project<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<ColumnResponse>>, ApiError> {
    let columns = state.board.list_for_project(project_id, user.id()).await?;
    Ok(Json(columns.iter().map(ColumnResponse::from).collect()))
}

pub(crate) async fn update<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<ColumnId>,
    Json(body): Json<UpdateColumnBody>,
) -> Result<Json<ColumnResponse>, ApiError> {
    let request = with_optional(
        UpdateColumnRequest::new(body.name),
        body.order,
        UpdateColumnRequest::with_order,
    );
    let column = state.board.update(id, request, user.id()).await?;
    Ok(Json(ColumnResponse::from(&column)))
}

pub(crate) async fn delete<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<ColumnId>,
) -> Result<StatusCode, ApiError> {
    state.board.delete(id, user.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}
