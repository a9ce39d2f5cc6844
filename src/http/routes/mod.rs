//! Request handlers and their wire types, one module per resource.

pub(super) mod columns;
pub(super) mod identity;
pub(super) mod projects;
pub(super) mod sprints;
pub(super) mod stories;
pub(super) mod tasks;
pub(super) mod versions;

/// `201 Created` with a JSON body.
pub(super) type Created<T> = (axum::http::StatusCode, axum::Json<T>);

pub(super) const fn created<T>(body: T) -> Created<T> {
    (axum::http::StatusCode::CREATED, axum::Json(body))
}

/// Applies an optional builder setter.
pub(super) fn with_optional<R, T>(request: R, value: Option<T>, set: impl FnOnce(R, T) -> R) -> R {
    if let Some(present) = value {
        return set(request, present);
    }
    request
}
