//! Shared application state handed to every handler.

use crate::board::services::BoardService;
use crate::identity::services::AuthService;
use crate::persistence::Store;
use crate::project::services::ProjectService;
use crate::release::services::ReleaseService;
use crate::sprint::services::SprintLifecycleService;
use crate::story::services::UserStoryService;
use crate::task::services::TaskService;
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;

/// Clock usable from request handlers.
pub trait AppClock: Clock + Send + Sync + 'static {}

impl<T> AppClock for T where T: Clock + Send + Sync + 'static {}

/// Router state: one instance of every service over a single store.
pub type SharedState<S, C> = Arc<AppState<S, C>>;

/// Services backing the REST surface.
pub struct AppState<S, C>
where
    S: Store,
    C: AppClock,
{
    /// Registration, login and bearer-token resolution.
    pub auth: AuthService<S, C>,
    /// Project CRUD and membership.
    pub projects: ProjectService<S, C>,
    /// Kanban columns.
    pub board: BoardService<S>,
    /// Sprint lifecycle and sprint planning.
    pub sprints: SprintLifecycleService<S, C>,
    /// User stories.
    pub stories: UserStoryService<S, C>,
    /// Tasks.
    pub tasks: TaskService<S, C>,
    /// Release versions.
    pub releases: ReleaseService<S, C>,
}

impl<S, C> AppState<S, C>
where
    S: Store,
    C: AppClock,
{
    /// Wires every service to `store` and `clock`; tokens live for `token_ttl`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, token_ttl: TimeDelta) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&store), Arc::clone(&clock), token_ttl),
            projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock)),
            board: BoardService::new(Arc::clone(&store)),
            sprints: SprintLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            stories: UserStoryService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskService::new(Arc::clone(&store), Arc::clone(&clock)),
            releases: ReleaseService::new(store, clock),
        }
    }

    /// Wraps the state for use with [`crate::http::build_router`].
    #[must_use]
    pub fn shared(self) -> SharedState<S, C> {
        Arc::new(self)
    }
}
