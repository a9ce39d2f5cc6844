//! Application services for registration, login and token checks.

mod auth;
mod lookup;

pub use auth::{AuthError, AuthResult, AuthService, AuthSession, LoginRequest, RegisterRequest};
pub use lookup::{UserLookupError, resolve_usernames};
