//! Mapping from service failures to HTTP responses.

use crate::board::services::BoardServiceError;
use crate::identity::domain::IdentityDomainError;
use crate::identity::services::AuthError;
use crate::persistence::RepositoryError;
use crate::project::services::{AccessError, ProjectServiceError};
use crate::release::services::ReleaseServiceError;
use crate::sprint::services::SprintLifecycleError;
use crate::story::services::StoryServiceError;
use crate::task::services::TaskServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Error returned by every handler, rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed input or a violated business rule (400).
    BadRequest(String),
    /// Missing, unknown, or expired credentials (401).
    Unauthorized(String),
    /// Authenticated but not allowed to act on the resource (403).
    Forbidden(String),
    /// The addressed resource does not exist (404).
    NotFound(String),
    /// Storage or other unexpected failure (500); the detail is only logged.
    Internal(String),
}

impl ApiError {
    /// Returns the status code this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                error!(error = %detail, "request failed");
                "internal server error".to_owned()
            }
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg) => msg,
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(message),
            RepositoryError::UniqueViolation(_) => Self::BadRequest(message),
            RepositoryError::Database(_) | RepositoryError::Connection(_) => {
                Self::Internal(message)
            }
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        let message = err.to_string();
        match err {
            AccessError::ProjectNotFound(_) => Self::NotFound(message),
            AccessError::NotMember { .. } | AccessError::NotOwner { .. } => {
                Self::Forbidden(message)
            }
            AccessError::Repository(source) => source.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::Domain(IdentityDomainError::PasswordHashing(_)) => Self::Internal(message),
            AuthError::Domain(_) | AuthError::UsernameTaken(_) | AuthError::EmailTaken(_) => {
                Self::BadRequest(message)
            }
            AuthError::InvalidCredentials | AuthError::InvalidToken => Self::Unauthorized(message),
            AuthError::UserNotFound(_) => Self::NotFound(message),
            AuthError::Repository(source) => source.into(),
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        let message = err.to_string();
        match err {
            ProjectServiceError::Domain(_) | ProjectServiceError::DuplicateName(_) => {
                Self::BadRequest(message)
            }
            ProjectServiceError::UnknownUser(_) => Self::NotFound(message),
            ProjectServiceError::Access(source) => source.into(),
            ProjectServiceError::Repository(source) => source.into(),
        }
    }
}

impl From<SprintLifecycleError> for ApiError {
    fn from(err: SprintLifecycleError) -> Self {
        let message = err.to_string();
        match err {
            SprintLifecycleError::NotFound(_) | SprintLifecycleError::StoryNotFound(_) => {
                Self::NotFound(message)
            }
            SprintLifecycleError::Domain(_)
            | SprintLifecycleError::ConflictingActiveSprint { .. }
            | SprintLifecycleError::DuplicateName { .. }
            | SprintLifecycleError::ProjectMismatch { .. } => Self::BadRequest(message),
            SprintLifecycleError::Access(source) => source.into(),
            SprintLifecycleError::Repository(source) => source.into(),
        }
    }
}

impl From<StoryServiceError> for ApiError {
    fn from(err: StoryServiceError) -> Self {
        let message = err.to_string();
        match err {
            StoryServiceError::NotFound(_) | StoryServiceError::UnknownUser(_) => {
                Self::NotFound(message)
            }
            StoryServiceError::Domain(_)
            | StoryServiceError::Status(_)
            | StoryServiceError::DuplicateTitle { .. }
            | StoryServiceError::AssigneeNotMember { .. }
            | StoryServiceError::SprintNotInProject { .. } => Self::BadRequest(message),
            StoryServiceError::Access(source) => source.into(),
            StoryServiceError::Repository(source) => source.into(),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        let message = err.to_string();
        match err {
            TaskServiceError::NotFound(_)
            | TaskServiceError::StoryNotFound(_)
            | TaskServiceError::UnknownUser(_) => Self::NotFound(message),
            TaskServiceError::Domain(_)
            | TaskServiceError::DuplicateTitle { .. }
            | TaskServiceError::AssigneeNotMember(_) => Self::BadRequest(message),
            TaskServiceError::Access(source) => source.into(),
            TaskServiceError::Repository(source) => source.into(),
        }
    }
}

impl From<BoardServiceError> for ApiError {
    fn from(err: BoardServiceError) -> Self {
        let message = err.to_string();
        match err {
            BoardServiceError::NotFound(_) => Self::NotFound(message),
            BoardServiceError::Domain(_) | BoardServiceError::DuplicateStatus { .. } => {
                Self::BadRequest(message)
            }
            BoardServiceError::DefaultColumnProtected(_) => Self::Forbidden(message),
            BoardServiceError::Access(source) => source.into(),
            BoardServiceError::Repository(source) => source.into(),
        }
    }
}

impl From<ReleaseServiceError> for ApiError {
    fn from(err: ReleaseServiceError) -> Self {
        let message = err.to_string();
        match err {
            ReleaseServiceError::NotFound(_) | ReleaseServiceError::StoryNotFound(_) => {
                Self::NotFound(message)
            }
            ReleaseServiceError::Domain(_)
            | ReleaseServiceError::DuplicateVersionNumber { .. }
            | ReleaseServiceError::DuplicateTitle { .. }
            | ReleaseServiceError::ProjectMismatch { .. } => Self::BadRequest(message),
            ReleaseServiceError::Access(source) => source.into(),
            ReleaseServiceError::Repository(source) => source.into(),
        }
    }
}
