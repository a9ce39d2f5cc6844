//! In-memory task repository.

use crate::persistence::memory::{InMemoryStore, collect_sorted};
use crate::persistence::{RepositoryError, RepositoryResult, constraints};
use crate::story::domain::StoryId;
use crate::task::domain::{Task, TaskId, TaskTitle};
use crate::task::ports::TaskRepository;
use async_trait::async_trait;

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn store_task(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write()?;
        let title_taken = state.tasks.values().any(|existing| {
            existing.story_id() == task.story_id() && existing.title() == task.title()
        });
        if title_taken {
            return Err(RepositoryError::unique(constraints::TASKS_STORY_TITLE));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> RepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(RepositoryError::not_found("task", task.id()));
        }
        let title_taken = state.tasks.values().any(|existing| {
            existing.id() != task.id()
                && existing.story_id() == task.story_id()
                && existing.title() == task.title()
        });
        if title_taken {
            return Err(RepositoryError::unique(constraints::TASKS_STORY_TITLE));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    async fn find_task_by_title(
        &self,
        story_id: StoryId,
        title: &TaskTitle,
    ) -> RepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .find(|task| task.story_id() == story_id && task.title() == title)
            .cloned())
    }

    async fn list_tasks_for_story(&self, story_id: StoryId) -> RepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.tasks.values(),
            |task| task.story_id() == story_id,
            |task| (task.created_at(), task.id()),
        ))
    }

    async fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        self.write()?
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("task", id))
    }
}
