//! Application services for projects and project access checks.

mod access;
mod projects;

pub use access::{AccessError, require_member, require_owner};
pub use projects::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
    UpdateProjectRequest,
};
