//! Membership and ownership checks reused by every project-scoped service.

use crate::identity::domain::UserId;
use crate::persistence::RepositoryError;
use crate::project::domain::{Project, ProjectId};
use crate::project::ports::ProjectRepository;
use thiserror::Error;

/// Errors returned by project access checks.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The acting user is not a member of the project.
    #[error("user {user_id} is not a member of project {project_id}")]
    NotMember {
        /// Project being accessed.
        project_id: ProjectId,
        /// Acting user.
        user_id: UserId,
    },
    /// The acting user does not own the project.
    #[error("user {user_id} does not own project {project_id}")]
    NotOwner {
        /// Project being accessed.
        project_id: ProjectId,
        /// Acting user.
        user_id: UserId,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

async fn load<R>(repository: &R, project_id: ProjectId) -> Result<Project, AccessError>
where
    R: ProjectRepository + ?Sized,
{
    repository
        .find_project(project_id)
        .await?
        .ok_or(AccessError::ProjectNotFound(project_id))
}

/// Loads a project the acting user is a member of.
///
/// # Errors
///
/// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotMember`].
pub async fn require_member<R>(
    repository: &R,
    project_id: ProjectId,
    user_id: UserId,
) -> Result<Project, AccessError>
where
    R: ProjectRepository + ?Sized,
{
    let project = load(repository, project_id).await?;
    if !project.is_member(user_id) {
        return Err(AccessError::NotMember {
            project_id,
            user_id,
        });
    }
    Ok(project)
}

/// Loads a project the acting user owns.
///
/// Non-members are reported as [`AccessError::NotOwner`] as well.
///
/// # Errors
///
/// Returns [`AccessError::ProjectNotFound`] or [`AccessError::NotOwner`].
pub async fn require_owner<R>(
    repository: &R,
    project_id: ProjectId,
    user_id: UserId,
) -> Result<Project, AccessError>
where
    R: ProjectRepository + ?Sized,
{
    let project = load(repository, project_id).await?;
    if !project.is_owner(user_id) {
        return Err(AccessError::NotOwner {
            project_id,
            user_id,
        });
    }
    Ok(project)
}
