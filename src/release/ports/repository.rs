//! Repository port for versions.

use crate::persistence::RepositoryResult;
use crate::project::domain::ProjectId;
use crate::release::domain::{Version, VersionId, VersionNumber, VersionTitle};
use async_trait::async_trait;

/// Version persistence contract.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Stores a new version.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::UniqueViolation`] naming
    /// [`crate::persistence::constraints::VERSIONS_PROJECT_NUMBER`] or
    /// [`crate::persistence::constraints::VERSIONS_PROJECT_TITLE`].
    async fn store_version(&self, version: &Version) -> RepositoryResult<()>;

    /// Persists changes to an existing version.
    async fn update_version(&self, version: &Version) -> RepositoryResult<()>;

    /// Finds a version by identifier.
    async fn find_version(&self, id: VersionId) -> RepositoryResult<Option<Version>>;

    /// Finds the version of `project_id` numbered `number`.
    async fn find_version_by_number(
        &self,
        project_id: ProjectId,
        number: &VersionNumber,
    ) -> RepositoryResult<Option<Version>>;

    /// Finds the version of `project_id` titled `title`.
    async fn find_version_by_title(
        &self,
        project_id: ProjectId,
        title: &VersionTitle,
    ) -> RepositoryResult<Option<Version>>;

    /// Lists the versions of a project, newest first.
    async fn list_versions_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<Version>>;

    /// Clears the version target of its stories and deletes the version in
    /// one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persistence::RepositoryError::NotFound`] when the
    /// version does not exist.
    async fn delete_version_detaching_stories(&self, id: VersionId) -> RepositoryResult<()>;
}
