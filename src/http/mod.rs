//! JSON REST surface served with axum.
//!
//! Every route except `/health` and `/api/auth/*` requires an
//! `Authorization: Bearer <token>` header resolved by [`AuthenticatedUser`].
//! Handlers translate wire DTOs into service requests and map service errors
//! onto [`ApiError`].

mod auth;
mod error;
mod extract;
mod router;
mod routes;
mod state;

pub use auth::AuthenticatedUser;
pub use error::ApiError;
pub(crate) use extract::{Json, Path};
pub use router::build_router;
pub use state::{AppClock, AppState, SharedState};

#[cfg(test)]
mod tests;
