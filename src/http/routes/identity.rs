//! Registration, login and account listing.

use super::{Created, created};
use crate::http::{ApiError, AppClock, AuthenticatedUser, Json, Path, SharedState};
use crate::identity::domain::{User, UserId};
use crate::identity::services::{AuthSession, LoginRequest, RegisterRequest};
use crate::persistence::Store;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterBody {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginBody {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    id: UserId,
    username: String,
    email: String,
    token: String,
    expires_at: DateTime<Utc>,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.user.id(),
            username: session.user.username().to_string(),
            email: session.user.email().to_string(),
            token: session.token.expose().to_owned(),
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
    id: UserId,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

pub(crate) async fn register<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    Json(body): Json<RegisterBody>,
) -> Result<Created<AuthResponse>, ApiError> {
    let request = RegisterRequest::new(body.username, body.email, body.password);
    let session = state.auth.register(request).await?;
    Ok(created(session.into()))
}

pub(crate) async fn login<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state
        .auth
        .login(LoginRequest::new(body.username, body.password))
        .await?;
    Ok(Json(session.into()))
}

pub(crate) async fn list_users<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.auth.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

pub(crate) async fn get_user<S: Store, C: AppClock>(
    State(state): State<SharedState<S, C>>,
    _user: AuthenticatedUser,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.find_user(id).await?;
    Ok(Json(UserResponse::from(&user)))
}
