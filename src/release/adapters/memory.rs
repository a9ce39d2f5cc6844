//! In-memory version repository.

use crate::persistence::memory::{InMemoryStore, StoreState, collect_sorted};
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use crate::project::domain::ProjectId;
use crate::release::domain::{Version, VersionId, VersionNumber, VersionTitle};
use crate::release::ports::VersionRepository;
use async_trait::async_trait;
use std::cmp::Reverse;

fn check_unique(state: &StoreState, version: &Version) -> RepositoryResult<()> {
    let siblings = || {
        state.versions.values().filter(|other| {
            other.id() != version.id() && other.project_id() == version.project_id()
        })
    };
    if siblings().any(|other| other.number() == version.number()) {
        return Err(RepositoryError::unique(constraints::VERSIONS_PROJECT_NUMBER));
    }
    if siblings().any(|other| other.title() == version.title()) {
        return Err(RepositoryError::unique(constraints::VERSIONS_PROJECT_TITLE));
    }
    Ok(())
}

#[async_trait]
impl VersionRepository for InMemoryStore {
    async fn store_version(&self, version: &Version) -> RepositoryResult<()> {
        let mut state = self.write()?;
        check_unique(&state, version)?;
        state.versions.insert(version.id(), version.clone());
        Ok(())
    }

    async fn update_version(&self, version: &Version) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.versions.contains_key(&version.id()) {
            return Err(RepositoryError::not_found("version", version.id()));
        }
        check_unique(&state, version)?;
        state.versions.insert(version.id(), version.clone());
        Ok(())
    }

    async fn find_version(&self, id: VersionId) -> RepositoryResult<Option<Version>> {
        Ok(self.read()?.versions.get(&id).cloned())
    }

    async fn find_version_by_number(
        &self,
        project_id: ProjectId,
        number: &VersionNumber,
    ) -> RepositoryResult<Option<Version>> {
        let state = self.read()?;
        Ok(state
            .versions
            .values()
            .find(|version| version.project_id() == project_id && version.number() == number)
            .cloned())
    }

    async fn find_version_by_title(
        &self,
        project_id: ProjectId,
        title: &VersionTitle,
    ) -> RepositoryResult<Option<Version>> {
        let state = self.read()?;
        Ok(state
            .versions
            .values()
            .find(|version| version.project_id() == project_id && version.title() == title)
            .cloned())
    }

    async fn list_versions_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<Version>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.versions.values(),
            |version| version.project_id() == project_id,
            |version| Reverse((version.created_at(), version.id())),
        ))
    }

    async fn delete_version_detaching_stories(&self, id: VersionId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.versions.remove(&id).is_none() {
            return Err(RepositoryError::not_found("version", id));
        }
        for story in state
            .stories
            .values_mut()
            .filter(|story| story.version_id() == Some(id))
        {
            story.detach_version();
        }
        Ok(())
    }
}
