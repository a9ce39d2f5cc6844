//! In-memory project repository.

use crate::board::domain::KanbanColumn;
use crate::identity::domain::UserId;
use crate::persistence::memory::{InMemoryStore, collect_sorted};
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use crate::project::domain::{Project, ProjectId, ProjectName};
use crate::project::ports::ProjectRepository;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn store_project(
        &self,
        project: &Project,
        initial_columns: &[KanbanColumn],
    ) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let name_taken = state.projects.values().any(|existing| {
            existing.owner_id() == project.owner_id() && existing.name() == project.name()
        });
        if name_taken {
            return Err(RepositoryError::unique(constraints::PROJECTS_OWNER_NAME));
        }
        state.projects.insert(project.id(), project.clone());
        for column in initial_columns {
            state.columns.insert(column.id(), column.clone());
        }
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.projects.contains_key(&project.id()) {
            return Err(RepositoryError::not_found("project", project.id()));
        }
        let name_taken = state.projects.values().any(|existing| {
            existing.id() != project.id()
                && existing.owner_id() == project.owner_id()
                && existing.name() == project.name()
        });
        if name_taken {
            return Err(RepositoryError::unique(constraints::PROJECTS_OWNER_NAME));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>> {
        Ok(self.read()?.projects.get(&id).cloned())
    }

    async fn find_project_by_owner_and_name(
        &self,
        owner_id: UserId,
        name: &ProjectName,
    ) -> RepositoryResult<Option<Project>> {
        let state = self.read()?;
        Ok(state
            .projects
            .values()
            .find(|project| project.owner_id() == owner_id && project.name() == name)
            .cloned())
    }

    async fn list_projects_for_member(&self, user_id: UserId) -> RepositoryResult<Vec<Project>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.projects.values(),
            |project| project.is_member(user_id),
            |project| (project.created_at(), project.id()),
        ))
    }

    async fn delete_project_cascade(&self, id: ProjectId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.remove(&id).is_none() {
            return Err(RepositoryError::not_found("project", id));
        }
        let story_ids: HashSet<_> = state
            .stories
            .values()
            .filter(|story| story.project_id() == id)
            .map(|story| story.id())
            .collect();
        state
            .tasks
            .retain(|_, task| !story_ids.contains(&task.story_id()));
        state.stories.retain(|_, story| story.project_id() != id);
        state.sprints.retain(|_, sprint| sprint.project_id() != id);
        state.versions.retain(|_, version| version.project_id() != id);
        state.columns.retain(|_, column| column.project_id() != id);
        Ok(())
    }
}
