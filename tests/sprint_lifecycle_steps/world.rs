//! Shared world state for sprint lifecycle BDD scenarios.

use mockable::DefaultClock;
use rstest::fixture;
use sprintboard::identity::domain::{Email, PasswordHash, User, UserId, Username};
use sprintboard::identity::ports::UserRepository;
use sprintboard::persistence::memory::InMemoryStore;
use sprintboard::project::domain::ProjectId;
use sprintboard::project::services::ProjectService;
use sprintboard::sprint::domain::Sprint;
use sprintboard::sprint::services::{SprintLifecycleError, SprintLifecycleService};
use std::collections::HashMap;
use std::sync::Arc;

/// Service type used by the BDD world.
pub type TestSprintService = SprintLifecycleService<InMemoryStore, DefaultClock>;

/// Scenario world for sprint lifecycle behaviour tests.
pub struct SprintWorld {
    pub store: Arc<InMemoryStore>,
    pub projects: ProjectService<InMemoryStore, DefaultClock>,
    pub sprints: TestSprintService,
    pub users: HashMap<String, UserId>,
    pub project: Option<ProjectId>,
    pub owner: Option<UserId>,
    pub sprints_by_name: HashMap<String, Sprint>,
    pub last_result: Option<Result<Sprint, SprintLifecycleError>>,
}

impl SprintWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            sprints: SprintLifecycleService::new(Arc::clone(&store), clock),
            store,
            users: HashMap::new(),
            project: None,
            owner: None,
            sprints_by_name: HashMap::new(),
            last_result: None,
        }
    }

    /// Registers `username` directly in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or storage fails.
    pub fn register(&mut self, username: &str) -> Result<UserId, eyre::Report> {
        let user = User::register(
            Username::new(username)?,
            Email::new(format!("{username}@example.com"))?,
            PasswordHash::derive("correct-horse")?,
            &DefaultClock,
        );
        run_async(self.store.store_user(&user))?;
        self.users.insert(username.to_owned(), user.id());
        Ok(user.id())
    }

    /// Looks up a registered user.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario never registered `username`.
    pub fn user(&self, username: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(username)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario user {username}"))
    }

    /// Looks up a sprint created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario never created `name`.
    pub fn sprint(&self, name: &str) -> Result<&Sprint, eyre::Report> {
        self.sprints_by_name
            .get(name)
            .ok_or_else(|| eyre::eyre!("unknown scenario sprint {name}"))
    }

    /// Returns the project owner.
    ///
    /// # Errors
    ///
    /// Returns an error if no project was set up.
    pub fn owner(&self) -> Result<UserId, eyre::Report> {
        self.owner
            .ok_or_else(|| eyre::eyre!("missing project owner in scenario world"))
    }

    /// Returns the scenario project.
    ///
    /// # Errors
    ///
    /// Returns an error if no project was set up.
    pub fn project(&self) -> Result<ProjectId, eyre::Report> {
        self.project
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }
}

impl Default for SprintWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SprintWorld {
    SprintWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
