//! Command-line and environment configuration for the server.

use chrono::TimeDelta;
use clap::Parser;
use std::net::SocketAddr;
use thiserror::Error;

/// Server configuration; every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "sprintboard", version, about = "Agile project tracking REST server")]
pub struct Config {
    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address the HTTP server listens on.
    #[arg(long, env = "SPRINTBOARD_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "SPRINTBOARD_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Lifetime of issued bearer tokens, in seconds.
    #[arg(long, env = "SPRINTBOARD_TOKEN_TTL_SECS", default_value_t = 86_400)]
    pub token_ttl_secs: u32,

    /// Keep all data in process memory instead of `PostgreSQL`.
    #[arg(long, env = "SPRINTBOARD_IN_MEMORY")]
    pub in_memory: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "SPRINTBOARD_LOG_JSON")]
    pub log_json: bool,

    /// Create a demo account at startup when it does not exist yet.
    #[arg(long, env = "SPRINTBOARD_SEED_USER")]
    pub seed_user: bool,

    /// Username of the demo account.
    #[arg(long, env = "SPRINTBOARD_SEED_USERNAME", default_value = "user")]
    pub seed_username: String,

    /// Password of the demo account.
    #[arg(long, env = "SPRINTBOARD_SEED_PASSWORD")]
    pub seed_password: Option<String>,

    /// Email address of the demo account.
    #[arg(long, env = "SPRINTBOARD_SEED_EMAIL", default_value = "user@test.com")]
    pub seed_email: String,
}

/// Inconsistent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither a database URL nor `--in-memory` was given.
    #[error("a database URL is required unless --in-memory is set")]
    MissingDatabaseUrl,

    /// `--seed-user` was given without a password.
    #[error("--seed-user requires --seed-password")]
    MissingSeedPassword,

    /// The pool must hold at least one connection.
    #[error("--pool-size must be at least 1")]
    EmptyPool,
}

/// Credentials of the demo account created by `--seed-user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    /// Account username.
    pub username: String,
    /// Account email address.
    pub email: String,
    /// Plain-text password, hashed on registration.
    pub password: String,
}

impl Config {
    /// Checks flag combinations clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.in_memory && self.database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        if self.seed_user && self.seed_password.is_none() {
            return Err(ConfigError::MissingSeedPassword);
        }
        if !self.in_memory && self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(())
    }

    /// Returns the configured token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.token_ttl_secs))
    }

    /// Returns the demo account to create, if `--seed-user` is set.
    #[must_use]
    pub fn seed(&self) -> Option<SeedUser> {
        if !self.seed_user {
            return None;
        }
        self.seed_password.as_ref().map(|password| SeedUser {
            username: self.seed_username.clone(),
            email: self.seed_email.clone(),
            password: password.clone(),
        })
    }
}
