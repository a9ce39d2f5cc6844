//! Registration, login and bearer-token authentication.

use crate::identity::domain::{
    AccessToken, Email, IdentityDomainError, PasswordHash, StoredToken, User, UserId, Username,
};
use crate::identity::ports::{TokenRepository, UserRepository};
use crate::persistence::{RepositoryError, constraints};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Request payload for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Authenticated account with its freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Authenticated account.
    pub user: User,
    /// Secret bearer token; shown to the client once.
    pub token: AccessToken,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Service-level errors for authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username, email or password failed validation.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// The username is registered already.
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
    /// The email address is registered already.
    #[error("email '{0}' is already registered")]
    EmailTaken(String),
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// The bearer token is unknown or expired.
    #[error("invalid or expired access token")]
    InvalidToken,
    /// No account has the identifier.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Account registration and token authentication service.
#[derive(Clone)]
pub struct AuthService<S, C>
where
    S: UserRepository + TokenRepository,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    token_ttl: TimeDelta,
}

impl<S, C> AuthService<S, C>
where
    S: UserRepository + TokenRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service issuing tokens valid for `token_ttl`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>, token_ttl: TimeDelta) -> Self {
        Self {
            store,
            clock,
            token_ttl,
        }
    }

    /// Registers an account and issues its first token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] for invalid input,
    /// [`AuthError::UsernameTaken`] or [`AuthError::EmailTaken`] for
    /// collisions, and [`AuthError::Repository`] on storage failure.
    #[tracing::instrument(skip_all, fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<AuthSession> {
        let user = self.create_user(request).await?;
        info!(user_id = %user.id(), "registered user");
        self.issue_session(user).await
    }

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username or
    /// a wrong password alike.
    #[tracing::instrument(skip_all, fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> AuthResult<AuthSession> {
        let Ok(username) = Username::new(request.username) else {
            return Err(AuthError::InvalidCredentials);
        };
        let Some(user) = self.store.find_user_by_username(&username).await? else {
            PasswordHash::verify_absent(&request.password);
            warn!("rejected login for unknown username");
            return Err(AuthError::InvalidCredentials);
        };
        if !user.verify_password(&request.password) {
            warn!(user_id = %user.id(), "rejected login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_session(user).await
    }

    /// Resolves a bearer token to its account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token is unknown, expired,
    /// or belongs to an account that no longer exists.
    pub async fn authenticate(&self, token: &AccessToken) -> AuthResult<User> {
        let record = self
            .store
            .find_token(&token.digest())
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if record.is_expired_at(self.clock.utc()) {
            warn!(user_id = %record.user_id, "rejected expired access token");
            return Err(AuthError::InvalidToken);
        }
        self.store
            .find_user(record.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Lists every account ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Repository`] on storage failure.
    pub async fn list_users(&self) -> AuthResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    /// Loads an account by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] when no account matches.
    pub async fn find_user(&self, id: UserId) -> AuthResult<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or(AuthError::UserNotFound(id))
    }

    /// Loads an account by username.
    ///
    /// Returns `Ok(None)` when no account matches.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] for a malformed username.
    pub async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let lookup = Username::new(username)?;
        Ok(self.store.find_user_by_username(&lookup).await?)
    }

    /// Registers the account unless its username already exists.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`AuthService::register`] except
    /// [`AuthError::UsernameTaken`].
    pub async fn ensure_seed_user(&self, request: RegisterRequest) -> AuthResult<User> {
        if let Some(existing) = self.find_by_username(&request.username).await? {
            debug!(username = %existing.username(), "seed user already present");
            return Ok(existing);
        }
        let user = self.create_user(request).await?;
        info!(username = %user.username(), "created seed user");
        Ok(user)
    }

    async fn create_user(&self, request: RegisterRequest) -> AuthResult<User> {
        let username = Username::new(request.username)?;
        let email = Email::new(request.email)?;
        if self.store.find_user_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken(email.to_string()));
        }
        let password_hash = PasswordHash::derive(&request.password)?;
        let user = User::register(username, email, password_hash, &*self.clock);
        self.store.store_user(&user).await.map_err(|err| {
            if err.violates(constraints::USERS_USERNAME) {
                AuthError::UsernameTaken(user.username().to_string())
            } else if err.violates(constraints::USERS_EMAIL) {
                AuthError::EmailTaken(user.email().to_string())
            } else {
                AuthError::Repository(err)
            }
        })?;
        Ok(user)
    }

    async fn issue_session(&self, user: User) -> AuthResult<AuthSession> {
        let purged = self.store.purge_expired_tokens(self.clock.utc()).await?;
        if purged > 0 {
            debug!(purged, "purged expired access tokens");
        }
        let token = AccessToken::generate();
        let record = StoredToken::issue(&token, user.id(), self.token_ttl, &*self.clock);
        self.store.store_token(&record).await?;
        Ok(AuthSession {
            user,
            token,
            expires_at: record.expires_at,
        })
    }
}
