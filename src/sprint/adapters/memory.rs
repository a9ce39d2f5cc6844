//! In-memory sprint repository.

use crate::persistence::memory::{InMemoryStore, StoreState, collect_sorted};
use crate::persistence::row_count;
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use crate::project::domain::ProjectId;
use crate::sprint::domain::{Sprint, SprintId, SprintName, SprintStatus};
use crate::sprint::ports::SprintRepository;
use async_trait::async_trait;

fn check_unique(state: &StoreState, sprint: &Sprint) -> RepositoryResult<()> {
    let siblings = || {
        state.sprints.values().filter(|other| {
            other.id() != sprint.id() && other.project_id() == sprint.project_id()
        })
    };
    if siblings().any(|other| other.name() == sprint.name()) {
        return Err(RepositoryError::unique(constraints::SPRINTS_PROJECT_NAME));
    }
    if sprint.status() == SprintStatus::Active
        && siblings().any(|other| other.status() == SprintStatus::Active)
    {
        return Err(RepositoryError::unique(constraints::SPRINTS_SINGLE_ACTIVE));
    }
    Ok(())
}

#[async_trait]
impl SprintRepository for InMemoryStore {
    async fn store_sprint(&self, sprint: &Sprint) -> RepositoryResult<()> {
        let mut state = self.write()?;
        check_unique(&state, sprint)?;
        state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn update_sprint(&self, sprint: &Sprint) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.sprints.contains_key(&sprint.id()) {
            return Err(RepositoryError::not_found("sprint", sprint.id()));
        }
        check_unique(&state, sprint)?;
        state.sprints.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn find_sprint(&self, id: SprintId) -> RepositoryResult<Option<Sprint>> {
        Ok(self.read()?.sprints.get(&id).cloned())
    }

    async fn find_sprint_by_name(
        &self,
        project_id: ProjectId,
        name: &SprintName,
    ) -> RepositoryResult<Option<Sprint>> {
        let state = self.read()?;
        Ok(state
            .sprints
            .values()
            .find(|sprint| sprint.project_id() == project_id && sprint.name() == name)
            .cloned())
    }

    async fn find_active_sprint(&self, project_id: ProjectId) -> RepositoryResult<Option<Sprint>> {
        let state = self.read()?;
        Ok(state
            .sprints
            .values()
            .find(|sprint| {
                sprint.project_id() == project_id && sprint.status() == SprintStatus::Active
            })
            .cloned())
    }

    async fn list_sprints_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<Sprint>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.sprints.values(),
            |sprint| sprint.project_id() == project_id,
            |sprint| (sprint.schedule().start(), sprint.name().as_str().to_owned()),
        ))
    }

    async fn delete_sprint_detaching_stories(&self, id: SprintId) -> RepositoryResult<u64> {
        let mut state = self.write()?;
        if state.sprints.remove(&id).is_none() {
            return Err(RepositoryError::not_found("sprint", id));
        }
        let mut detached = 0;
        for story in state
            .stories
            .values_mut()
            .filter(|story| story.sprint_id() == Some(id))
        {
            story.detach_sprint();
            detached += 1;
        }
        row_count(detached)
    }
}
