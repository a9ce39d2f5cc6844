//! Fixtures shared by the unit tests of every context.

use crate::identity::domain::{Email, PasswordHash, User, UserId, Username};
use crate::identity::ports::UserRepository;
use crate::persistence::memory::InMemoryStore;
use crate::project::domain::ProjectId;
use crate::project::services::{CreateProjectRequest, ProjectService};
use chrono::NaiveDate;
use eyre::{OptionExt, Result};
use mockable::DefaultClock;
use std::sync::Arc;

pub(crate) const PASSWORD: &str = "correct-horse";

/// A project owned by `owner` with `member` on the team and an `outsider`
/// account that belongs to no project.
pub(crate) struct Workspace {
    pub(crate) store: Arc<InMemoryStore>,
    pub(crate) clock: Arc<DefaultClock>,
    pub(crate) owner: UserId,
    pub(crate) member: UserId,
    pub(crate) outsider: UserId,
    pub(crate) project: ProjectId,
}

pub(crate) async fn register(store: &InMemoryStore, username: &str) -> Result<User> {
    let user = User::register(
        Username::new(username)?,
        Email::new(format!("{username}@example.com"))?,
        PasswordHash::derive(PASSWORD)?,
        &DefaultClock,
    );
    store.store_user(&user).await?;
    Ok(user)
}

pub(crate) async fn workspace() -> Result<Workspace> {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(DefaultClock);
    let owner = register(&store, "olivia").await?.id();
    let member = register(&store, "marcus").await?.id();
    let outsider = register(&store, "xavier").await?.id();
    let projects = ProjectService::new(Arc::clone(&store), Arc::clone(&clock));
    let project = projects
        .create(
            CreateProjectRequest::new("Apollo").with_members(["marcus".to_owned()]),
            owner,
        )
        .await?
        .id();
    Ok(Workspace {
        store,
        clock,
        owner,
        member,
        outsider,
        project,
    })
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_eyre("invalid calendar date")
}
