//! Store-agnostic workflows exercised against every backing store.
//!
//! Each workflow registers its own accounts with a unique suffix so runs can
//! share one database.

use chrono::{NaiveDate, TimeDelta};
use eyre::{OptionExt, bail, ensure};
use mockable::DefaultClock;
use sprintboard::board::ports::ColumnRepository;
use sprintboard::http::{AppState, SharedState};
use sprintboard::identity::domain::{Email, PasswordHash, TokenDigest, User, UserId, Username};
use sprintboard::identity::ports::{TokenRepository, UserRepository};
use sprintboard::identity::services::{LoginRequest, RegisterRequest};
use sprintboard::persistence::{RepositoryError, Store, constraints};
use sprintboard::project::domain::ProjectId;
use sprintboard::project::ports::ProjectRepository;
use sprintboard::project::services::CreateProjectRequest;
use sprintboard::release::domain::VersionStatus;
use sprintboard::release::ports::VersionRepository;
use sprintboard::release::services::VersionRequest;
use sprintboard::sprint::domain::{NewSprint, Sprint, SprintName, SprintSchedule, SprintStatus};
use sprintboard::sprint::ports::SprintRepository;
use sprintboard::sprint::services::{CreateSprintRequest, SprintLifecycleError};
use sprintboard::story::ports::StoryRepository;
use sprintboard::story::services::CreateStoryRequest;
use sprintboard::task::ports::TaskRepository;
use sprintboard::task::services::CreateTaskRequest;
use std::sync::Arc;
use uuid::Uuid;

const PASSWORD: &str = "correct-horse";

/// Services over one store plus a project with an owner and a member.
pub struct Harness<S: Store> {
    pub store: Arc<S>,
    pub state: SharedState<S, DefaultClock>,
    pub owner: UserId,
    pub member: UserId,
    pub project: ProjectId,
}

impl<S: Store> Harness<S> {
    /// Registers `owner_<suffix>` and `member_<suffix>` and creates their project.
    pub async fn new(store: Arc<S>) -> eyre::Result<Self> {
        let suffix = Uuid::new_v4().simple().to_string();
        let state = AppState::new(Arc::clone(&store), Arc::new(DefaultClock), TimeDelta::hours(1))
            .shared();
        let owner_name = format!("owner_{suffix}");
        let member_name = format!("member_{suffix}");
        let owner = state
            .auth
            .register(RegisterRequest::new(
                owner_name.as_str(),
                format!("{owner_name}@example.com"),
                PASSWORD,
            ))
            .await?
            .user
            .id();
        let member = state
            .auth
            .register(RegisterRequest::new(
                member_name.as_str(),
                format!("{member_name}@example.com"),
                PASSWORD,
            ))
            .await?
            .user
            .id();
        let project = state
            .projects
            .create(
                CreateProjectRequest::new(format!("Apollo {suffix}")).with_members([member_name]),
                owner,
            )
            .await?
            .id();
        Ok(Self {
            store,
            state,
            owner,
            member,
            project,
        })
    }

    pub async fn planned_sprint(&self, name: &str) -> eyre::Result<Sprint> {
        Ok(self
            .state
            .sprints
            .create(
                CreateSprintRequest::new(self.project, name, date(2026, 3, 2)?, date(2026, 3, 13)?),
                self.owner,
            )
            .await?)
    }
}

pub fn date(year: i32, month: u32, day: u32) -> eyre::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_eyre("invalid calendar date")
}

/// Starting a second sprint fails until the first one completes.
pub async fn single_active_sprint<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let sprints = &harness.state.sprints;
    let first = harness.planned_sprint("Sprint 1").await?;
    let second = harness.planned_sprint("Sprint 2").await?;

    sprints.start(first.id(), harness.owner).await?;
    let conflict = sprints.start(second.id(), harness.owner).await;
    ensure!(
        matches!(conflict, Err(SprintLifecycleError::ConflictingActiveSprint { project_id }) if project_id == harness.project),
        "expected ConflictingActiveSprint, got {conflict:?}"
    );
    let stored = harness
        .store
        .find_sprint(second.id())
        .await?
        .ok_or_eyre("second sprint vanished")?;
    ensure!(stored.status() == SprintStatus::Planned, "rejected start must not persist");

    sprints.complete(first.id(), harness.owner).await?;
    let started = sprints.start(second.id(), harness.owner).await?;
    ensure!(started.status() == SprintStatus::Active);
    Ok(())
}

/// Racing starts of two planned sprints leave exactly one active.
pub async fn racing_starts_leave_one_active<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let first = harness.planned_sprint("Sprint A").await?;
    let second = harness.planned_sprint("Sprint B").await?;
    let sprints = &harness.state.sprints;

    let (left, right) = tokio::join!(
        sprints.start(first.id(), harness.owner),
        sprints.start(second.id(), harness.owner),
    );
    let winners = [left.is_ok(), right.is_ok()]
        .into_iter()
        .filter(|won| *won)
        .count();
    ensure!(winners == 1, "expected exactly one start to win, {winners} did");
    for loser in [left, right].into_iter().filter_map(Result::err) {
        ensure!(
            matches!(loser, SprintLifecycleError::ConflictingActiveSprint { .. }),
            "loser failed with {loser:?}"
        );
    }
    let active = harness.store.find_active_sprint(harness.project).await?;
    ensure!(active.is_some(), "one sprint must be active");
    Ok(())
}

/// Deleting a sprint returns its stories to the backlog.
pub async fn sprint_delete_detaches_stories<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let sprint = harness.planned_sprint("Sprint 1").await?;
    let story = harness
        .state
        .stories
        .create(
            CreateStoryRequest::new(harness.project, "Login page").with_sprint(sprint.id()),
            harness.member,
        )
        .await?;
    ensure!(story.sprint_id() == Some(sprint.id()));

    harness.state.sprints.delete(sprint.id(), harness.owner).await?;

    let reloaded = harness
        .store
        .find_story(story.id())
        .await?
        .ok_or_eyre("story deleted with its sprint")?;
    ensure!(reloaded.sprint_id().is_none(), "story still points at the deleted sprint");
    let backlog = harness
        .state
        .sprints
        .backlog(harness.project, harness.member)
        .await?;
    ensure!(backlog.iter().any(|candidate| candidate.id() == story.id()));
    Ok(())
}

/// Moving a story to a status links the matching board column.
pub async fn status_change_links_column<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let story = harness
        .state
        .stories
        .create(CreateStoryRequest::new(harness.project, "Search"), harness.owner)
        .await?;

    let moved = harness
        .state
        .stories
        .update_status(story.id(), "IN_PROGRESS", harness.member)
        .await?;
    let column = harness
        .store
        .list_columns_for_project(harness.project)
        .await?
        .into_iter()
        .find(|candidate| candidate.status().as_str() == "IN_PROGRESS")
        .ok_or_eyre("default IN_PROGRESS column missing")?;
    ensure!(moved.status().as_str() == "IN_PROGRESS");
    ensure!(moved.column_id() == Some(column.id()));
    Ok(())
}

/// Deleting a project removes everything it contains.
pub async fn project_delete_cascades<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let state = &harness.state;
    let sprint = harness.planned_sprint("Sprint 1").await?;
    let story = state
        .stories
        .create(
            CreateStoryRequest::new(harness.project, "Checkout").with_sprint(sprint.id()),
            harness.owner,
        )
        .await?;
    let task = state
        .tasks
        .create(CreateTaskRequest::new(story.id(), "Payment form"), harness.owner)
        .await?;
    let version = state
        .releases
        .create(harness.project, VersionRequest::new("First", "1.0.0"), harness.owner)
        .await?;
    state
        .releases
        .assign_story(version.id(), story.id(), harness.owner)
        .await?;

    state.projects.delete(harness.project, harness.owner).await?;

    let persisted = &harness.store;
    ensure!(persisted.find_project(harness.project).await?.is_none());
    ensure!(persisted.find_sprint(sprint.id()).await?.is_none());
    ensure!(persisted.find_story(story.id()).await?.is_none());
    ensure!(persisted.find_task(task.id()).await?.is_none());
    ensure!(persisted.find_version(version.id()).await?.is_none());
    ensure!(persisted.list_columns_for_project(harness.project).await?.is_empty());
    Ok(())
}

/// Releasing and deleting a version keeps its stories.
pub async fn version_delete_keeps_stories<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let state = &harness.state;
    let version = state
        .releases
        .create(harness.project, VersionRequest::new("First", "1.0.0"), harness.member)
        .await?;
    let story = state
        .stories
        .create(CreateStoryRequest::new(harness.project, "Invoices"), harness.member)
        .await?;
    state
        .releases
        .assign_story(version.id(), story.id(), harness.member)
        .await?;
    let released = state
        .releases
        .update_status(version.id(), VersionStatus::Released, harness.member)
        .await?;
    ensure!(released.status() == VersionStatus::Released);

    state.releases.delete(version.id(), harness.member).await?;
    let Some(kept) = harness.store.find_story(story.id()).await? else {
        bail!("story deleted with its version");
    };
    ensure!(kept.version_id().is_none());
    Ok(())
}

/// The store itself refuses a second active sprint in one project.
pub async fn store_rejects_second_active_sprint<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(store).await?;
    let active = |name: &str| -> eyre::Result<Sprint> {
        Ok(Sprint::new(
            NewSprint {
                project_id: harness.project,
                name: SprintName::new(name)?,
                schedule: SprintSchedule::new(date(2026, 4, 1)?, date(2026, 4, 14)?)?,
                status: SprintStatus::Active,
            },
            &DefaultClock,
        ))
    };
    harness.store.store_sprint(&active("Sprint 1")?).await?;
    let second = harness.store.store_sprint(&active("Sprint 2")?).await;
    ensure!(
        matches!(&second, Err(err) if err.violates(constraints::SPRINTS_SINGLE_ACTIVE)),
        "expected the single-active constraint, got {second:?}"
    );
    Ok(())
}

/// The store refuses a second account with the same username.
pub async fn store_rejects_duplicate_username<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let name = format!("dup_{}", Uuid::new_v4().simple());
    let account = |email: &str| -> eyre::Result<User> {
        Ok(User::register(
            Username::new(name.as_str())?,
            Email::new(email)?,
            PasswordHash::derive(PASSWORD)?,
            &DefaultClock,
        ))
    };
    store
        .store_user(&account(&format!("{name}@example.com"))?)
        .await?;
    let clash = store
        .store_user(&account(&format!("{name}@elsewhere.example"))?)
        .await;
    match clash {
        Err(RepositoryError::UniqueViolation(constraint)) => {
            ensure!(constraint == constraints::USERS_USERNAME, "wrong constraint {constraint}");
        }
        other => bail!("expected a unique violation, got {other:?}"),
    }
    Ok(())
}

/// Only token digests are persisted, and expired ones can be purged.
pub async fn tokens_persist_as_digests<S: Store>(store: Arc<S>) -> eyre::Result<()> {
    let harness = Harness::new(Arc::clone(&store)).await?;
    let user = harness.state.auth.find_user(harness.owner).await?;
    let session = harness
        .state
        .auth
        .login(LoginRequest::new(user.username().as_str(), PASSWORD))
        .await?;

    let raw = TokenDigest::from_persisted(session.token.expose());
    ensure!(store.find_token(&raw).await?.is_none(), "raw token must not be stored");
    let stored = store
        .find_token(&session.token.digest())
        .await?
        .ok_or_eyre("token digest not stored")?;
    ensure!(stored.user_id == harness.owner);

    let authenticated = harness.state.auth.authenticate(&session.token).await?;
    ensure!(authenticated.id() == harness.owner);

    store
        .purge_expired_tokens(stored.expires_at + TimeDelta::seconds(1))
        .await?;
    ensure!(store.find_token(&session.token.digest()).await?.is_none());
    Ok(())
}
