//! In-memory user story repository.

use crate::persistence::memory::{InMemoryStore, collect_sorted};
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use crate::project::domain::ProjectId;
use crate::release::domain::VersionId;
use crate::sprint::domain::SprintId;
use crate::story::domain::{StoryId, StoryTitle, UserStory};
use crate::story::ports::StoryRepository;
use async_trait::async_trait;

impl InMemoryStore {
    fn stories_where(&self, keep: impl Fn(&UserStory) -> bool) -> RepositoryResult<Vec<UserStory>> {
        let state = self.read()?;
        Ok(collect_sorted(state.stories.values(), keep, |story| {
            (story.created_at(), story.id())
        }))
    }
}

#[async_trait]
impl StoryRepository for InMemoryStore {
    async fn store_story(&self, story: &UserStory) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let title_taken = state.stories.values().any(|existing| {
            existing.project_id() == story.project_id() && existing.title() == story.title()
        });
        if title_taken {
            return Err(RepositoryError::unique(constraints::STORIES_PROJECT_TITLE));
        }
        state.stories.insert(story.id(), story.clone());
        Ok(())
    }

    async fn update_story(&self, story: &UserStory) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.stories.contains_key(&story.id()) {
            return Err(RepositoryError::not_found("user story", story.id()));
        }
        let title_taken = state.stories.values().any(|existing| {
            existing.id() != story.id()
                && existing.project_id() == story.project_id()
                && existing.title() == story.title()
        });
        if title_taken {
            return Err(RepositoryError::unique(constraints::STORIES_PROJECT_TITLE));
        }
        state.stories.insert(story.id(), story.clone());
        Ok(())
    }

    async fn find_story(&self, id: StoryId) -> RepositoryResult<Option<UserStory>> {
        Ok(self.read()?.stories.get(&id).cloned())
    }

    async fn find_story_by_title(
        &self,
        project_id: ProjectId,
        title: &StoryTitle,
    ) -> RepositoryResult<Option<UserStory>> {
        let state = self.read()?;
        Ok(state
            .stories
            .values()
            .find(|story| story.project_id() == project_id && story.title() == title)
            .cloned())
    }

    async fn list_stories_for_project(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.stories_where(|story| story.project_id() == project_id)
    }

    async fn list_backlog_stories(
        &self,
        project_id: ProjectId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.stories_where(|story| story.project_id() == project_id && story.sprint_id().is_none())
    }

    async fn list_stories_for_sprint(
        &self,
        sprint_id: SprintId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.stories_where(|story| story.sprint_id() == Some(sprint_id))
    }

    async fn list_stories_for_version(
        &self,
        version_id: VersionId,
    ) -> RepositoryResult<Vec<UserStory>> {
        self.stories_where(|story| story.version_id() == Some(version_id))
    }

    async fn delete_story_with_tasks(&self, id: StoryId) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if state.stories.remove(&id).is_none() {
            return Err(RepositoryError::not_found("user story", id));
        }
        state.tasks.retain(|_, task| task.story_id() != id);
        Ok(())
    }
}
