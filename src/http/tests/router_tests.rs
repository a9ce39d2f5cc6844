//! Health, authentication, and error rendering.

use super::super::{AppState, build_router};
use crate::persistence::memory::InMemoryStore;
use crate::test_support::PASSWORD;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::TimeDelta;
use eyre::{OptionExt, ensure};
use http_body_util::BodyExt;
use mockable::DefaultClock;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub(super) fn app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(DefaultClock),
        TimeDelta::hours(1),
    );
    build_router(state.shared())
}

/// Sends a request and returns the status with the decoded JSON body
/// (`Value::Null` for an empty body).
pub(super) async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> eyre::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    }
    let request = match body {
        Some(json_body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json_body)?))?,
        None => builder.body(Body::empty())?,
    };
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    if bytes.is_empty() {
        return Ok((status, Value::Null));
    }
    Ok((status, serde_json::from_slice(&bytes)?))
}

/// Registers `username` and returns its bearer token.
pub(super) async fn sign_up(router: &Router, username: &str) -> eyre::Result<String> {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
        })),
    )
    .await?;
    ensure!(status == StatusCode::CREATED, "register returned {status}: {body}");
    body.get("token")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_eyre("register response carries no token")
}

pub(super) fn id_of(body: &Value) -> eyre::Result<String> {
    body.get("id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_eyre("response carries no id")
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_ok() -> eyre::Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    ensure!(response.status() == StatusCode::OK);
    let bytes = response.into_body().collect().await?.to_bytes();
    ensure!(bytes.as_ref() == b"ok");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn register_then_login_issues_tokens() -> eyre::Result<()> {
    let router = app();
    sign_up(&router, "olivia").await?;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "olivia", "password": PASSWORD })),
    )
    .await?;
    ensure!(status == StatusCode::OK, "login returned {status}");
    ensure!(body.get("username") == Some(&json!("olivia")));
    ensure!(body.get("token").and_then(Value::as_str).is_some());
    ensure!(body.get("expiresAt").is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_a_bad_request() -> eyre::Result<()> {
    let router = app();
    sign_up(&router, "olivia").await?;
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": "olivia",
            "email": "someone-else@example.com",
            "password": PASSWORD,
        })),
    )
    .await?;
    ensure!(status == StatusCode::BAD_REQUEST);
    ensure!(body.get("error").and_then(Value::as_str).is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_unauthorized() -> eyre::Result<()> {
    let router = app();
    sign_up(&router, "olivia").await?;
    let (status, _) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "olivia", "password": "not-the-password" })),
    )
    .await?;
    ensure!(status == StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn protected_routes_require_a_bearer_token() -> eyre::Result<()> {
    let router = app();
    let (missing, body) = send(&router, Method::GET, "/api/projects/mine", None, None).await?;
    ensure!(missing == StatusCode::UNAUTHORIZED);
    ensure!(body.get("error") == Some(&json!("missing bearer token")));

    let (bogus, _) = send(
        &router,
        Method::GET,
        "/api/projects/mine",
        Some("not-a-token"),
        None,
    )
    .await?;
    ensure!(bogus == StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn project_lifecycle_over_http() -> eyre::Result<()> {
    let router = app();
    let owner = sign_up(&router, "olivia").await?;
    sign_up(&router, "marcus").await?;

    let (created, project) = send(
        &router,
        Method::POST,
        "/api/projects",
        Some(&owner),
        Some(json!({ "name": "Apollo", "members": ["marcus"] })),
    )
    .await?;
    ensure!(created == StatusCode::CREATED, "create returned {created}: {project}");
    ensure!(project.pointer("/owner/username") == Some(&json!("olivia")));
    let id = id_of(&project)?;

    let (listed, mine) = send(&router, Method::GET, "/api/projects/mine", Some(&owner), None).await?;
    ensure!(listed == StatusCode::OK);
    ensure!(mine.as_array().map(Vec::len) == Some(1));

    let (columns_status, columns) = send(
        &router,
        Method::GET,
        &format!("/api/kanban-columns/project/{id}"),
        Some(&owner),
        None,
    )
    .await?;
    ensure!(columns_status == StatusCode::OK);
    ensure!(columns.as_array().map(Vec::len) == Some(3), "expected default columns: {columns}");

    let (deleted, empty) = send(
        &router,
        Method::DELETE,
        &format!("/api/projects/{id}"),
        Some(&owner),
        None,
    )
    .await?;
    ensure!(deleted == StatusCode::NO_CONTENT);
    ensure!(empty.is_null());

    let (gone, _) = send(
        &router,
        Method::GET,
        &format!("/api/projects/{id}"),
        Some(&owner),
        None,
    )
    .await?;
    ensure!(gone == StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn outsiders_are_forbidden() -> eyre::Result<()> {
    let router = app();
    let owner = sign_up(&router, "olivia").await?;
    let outsider = sign_up(&router, "xavier").await?;
    let (_, project) = send(
        &router,
        Method::POST,
        "/api/projects",
        Some(&owner),
        Some(json!({ "name": "Apollo" })),
    )
    .await?;
    let id = id_of(&project)?;

    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/api/projects/{id}"),
        Some(&outsider),
        None,
    )
    .await?;
    ensure!(status == StatusCode::FORBIDDEN);
    Ok(())
}
