//! Route table.

use super::routes::{columns, identity, projects, sprints, stories, tasks, versions};
use super::state::{AppClock, SharedState};
use crate::persistence::Store;
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the complete application router over `state`.
///
/// Includes an unauthenticated `GET /health` liveness probe, a request trace
/// layer, and permissive CORS.
#[must_use]
pub fn build_router<S, C>(state: SharedState<S, C>) -> Router
where
    S: Store,
    C: AppClock,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/auth/register", post(identity::register::<S, C>))
        .route("/api/auth/login", post(identity::login::<S, C>))
        .route("/api/users", get(identity::list_users::<S, C>))
        .route("/api/users/{id}", get(identity::get_user::<S, C>))
        .route("/api/projects", post(projects::create::<S, C>))
        .route("/api/projects/mine", get(projects::list_mine::<S, C>))
        .route(
            "/api/projects/{id}",
            get(projects::get::<S, C>)
                .put(projects::update::<S, C>)
                .delete(projects::delete::<S, C>),
        )
        .route("/api/sprints", post(sprints::create::<S, C>))
        .route(
            "/api/sprints/project/{id}",
            get(sprints::list_for_project::<S, C>),
        )
        .route(
            "/api/sprints/project/{id}/backlog",
            get(sprints::backlog::<S, C>),
        )
        .route(
            "/api/sprints/{id}",
            get(sprints::get::<S, C>)
                .put(sprints::update::<S, C>)
                .delete(sprints::delete::<S, C>),
        )
        .route("/api/sprints/{id}/start", post(sprints::start::<S, C>))
        .route("/api/sprints/{id}/complete", post(sprints::complete::<S, C>))
        .route(
            "/api/sprints/{id}/user-stories",
            get(sprints::list_stories::<S, C>),
        )
        .route(
            "/api/sprints/{id}/user-stories/{story}",
            post(sprints::assign_story::<S, C>),
        )
        .route(
            "/api/sprints/user-stories/{story}/sprint",
            axum::routing::delete(sprints::remove_story::<S, C>),
        )
        .route("/api/user-stories", post(stories::create::<S, C>))
        .route(
            "/api/user-stories/project/{id}",
            get(stories::list_for_project::<S, C>),
        )
        .route(
            "/api/user-stories/{id}",
            get(stories::get::<S, C>)
                .put(stories::update::<S, C>)
                .delete(stories::delete::<S, C>),
        )
        .route(
            "/api/user-stories/{id}/status",
            put(stories::update_status::<S, C>),
        )
        .route("/api/tasks", post(tasks::create::<S, C>))
        .route(
            "/api/tasks/user-story/{id}",
            get(tasks::list_for_story::<S, C>),
        )
        .route(
            "/api/tasks/{id}",
            get(tasks::get::<S, C>)
                .put(tasks::update::<S, C>)
                .delete(tasks::delete::<S, C>),
        )
        .route("/api/kanban-columns", post(columns::create::<S, C>))
        .route(
            "/api/kanban-columns/project/{id}",
            get(columns::list_for_project::<S, C>),
        )
        .route(
            "/api/kanban-columns/{id}",
            put(columns::update::<S, C>).delete(columns::delete::<S, C>),
        )
        .route("/api/versions", post(versions::create::<S, C>))
        .route(
            "/api/versions/project/{id}",
            get(versions::list_for_project::<S, C>),
        )
        .route(
            "/api/versions/{id}",
            get(versions::get::<S, C>)
                .put(versions::update::<S, C>)
                .delete(versions::delete::<S, C>),
        )
        .route(
            "/api/versions/{id}/status",
            put(versions::update_status::<S, C>),
        )
        .route(
            "/api/versions/{id}/user-stories",
            get(versions::list_stories::<S, C>),
        )
        .route(
            "/api/versions/{id}/user-stories/{story}",
            post(versions::assign_story::<S, C>).delete(versions::remove_story::<S, C>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
