//! Service tests for registration, login and token authentication.

use crate::identity::domain::{AccessToken, IdentityDomainError};
use crate::identity::services::{AuthError, AuthService, LoginRequest, RegisterRequest};
use crate::persistence::memory::InMemoryStore;
use chrono::TimeDelta;
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService = AuthService<InMemoryStore, DefaultClock>;

#[fixture]
fn service() -> TestService {
    AuthService::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(DefaultClock),
        TimeDelta::hours(24),
    )
}

fn olivia() -> RegisterRequest {
    RegisterRequest::new("olivia", "olivia@example.com", "correct-horse")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_issues_a_working_token(service: TestService) -> eyre::Result<()> {
    let session = service.register(olivia()).await?;

    let user = service.authenticate(&session.token).await?;

    ensure!(user.id() == session.user.id(), "token resolves to the new user");
    ensure!(user.username().as_str() == "olivia", "username stored");
    ensure!(session.expires_at > user.created_at(), "token expires in the future");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_taken_username_and_email(service: TestService) -> eyre::Result<()> {
    service.register(olivia()).await?;

    let same_name = service
        .register(RegisterRequest::new("olivia", "other@example.com", "correct-horse"))
        .await;
    let same_email = service
        .register(RegisterRequest::new("olivia2", "olivia@example.com", "correct-horse"))
        .await;

    ensure!(
        matches!(same_name, Err(AuthError::UsernameTaken(ref name)) if name == "olivia"),
        "expected UsernameTaken, got {same_name:?}"
    );
    ensure!(
        matches!(same_email, Err(AuthError::EmailTaken(_))),
        "expected EmailTaken, got {same_email:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_validates_input(service: TestService) {
    let short = service
        .register(RegisterRequest::new("olivia", "olivia@example.com", "short"))
        .await;
    let bad_email = service
        .register(RegisterRequest::new("olivia", "not-an-email", "correct-horse"))
        .await;

    assert!(matches!(
        short,
        Err(AuthError::Domain(IdentityDomainError::PasswordTooShort { .. }))
    ));
    assert!(matches!(
        bad_email,
        Err(AuthError::Domain(IdentityDomainError::InvalidEmail(_)))
    ));
}

#[rstest]
#[case("olivia", "wrong-password")]
#[case("nobody", "correct-horse")]
#[case("x", "correct-horse")]
#[tokio::test(flavor = "multi_thread")]
async fn login_failures_are_indistinguishable(
    service: TestService,
    #[case] username: &str,
    #[case] password: &str,
) -> eyre::Result<()> {
    service.register(olivia()).await?;

    let result = service.login(LoginRequest::new(username, password)).await;

    ensure!(
        matches!(result, Err(AuthError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_issues_a_fresh_token(service: TestService) -> eyre::Result<()> {
    let registered = service.register(olivia()).await?;

    let session = service
        .login(LoginRequest::new("olivia", "correct-horse"))
        .await?;

    ensure!(
        session.token.expose() != registered.token.expose(),
        "each login issues a new token"
    );
    ensure!(
        service.authenticate(&registered.token).await.is_ok(),
        "earlier tokens stay valid"
    );
    ensure!(
        service.authenticate(&session.token).await?.id() == registered.user.id(),
        "new token authenticates"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_and_expired_tokens_are_rejected() -> eyre::Result<()> {
    let expiring = AuthService::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(DefaultClock),
        TimeDelta::zero(),
    );
    let session = expiring.register(olivia()).await?;

    let expired = expiring.authenticate(&session.token).await;
    let unknown = expiring
        .authenticate(&AccessToken::from_presented("not-a-token"))
        .await;

    ensure!(
        matches!(expired, Err(AuthError::InvalidToken)),
        "expected InvalidToken, got {expired:?}"
    );
    ensure!(
        matches!(unknown, Err(AuthError::InvalidToken)),
        "expected InvalidToken, got {unknown:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_seed_user_is_idempotent(service: TestService) -> eyre::Result<()> {
    let first = service.ensure_seed_user(olivia()).await?;
    let second = service.ensure_seed_user(olivia()).await?;

    ensure!(first.id() == second.id(), "seed user created once");
    ensure!(service.list_users().await?.len() == 1, "one account");
    ensure!(
        service.find_by_username("olivia").await? == Some(first.clone()),
        "lookup by username"
    );
    ensure!(service.find_user(first.id()).await? == first, "lookup by id");
    Ok(())
}
