//! Sprintboard REST server.
//!
//! ```text
//! sprintboard --database-url postgres://localhost/sprintboard
//! sprintboard --in-memory --seed-user --seed-password secure_password
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use mockable::DefaultClock;
use sprintboard::config::Config;
use sprintboard::http::{AppState, build_router};
use sprintboard::identity::services::RegisterRequest;
use sprintboard::logging;
use sprintboard::persistence::Store;
use sprintboard::persistence::memory::InMemoryStore;
use sprintboard::persistence::postgres::{PostgresStore, build_pool};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.log_json).context("failed to initialise logging")?;
    config.validate().context("invalid configuration")?;

    if config.in_memory {
        warn!("using in-memory storage; data is lost on shutdown");
        return serve(Arc::new(InMemoryStore::new()), &config).await;
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("no database URL configured")?;
    let pool = build_pool(database_url, config.pool_size)
        .context("failed to connect to PostgreSQL")?;
    let store = PostgresStore::new(pool);
    store.migrate().await.context("failed to apply migrations")?;
    serve(Arc::new(store), &config).await
}

async fn serve<S: Store>(store: Arc<S>, config: &Config) -> Result<()> {
    let state = AppState::new(store, Arc::new(DefaultClock), config.token_ttl());
    if let Some(seed) = config.seed() {
        state
            .auth
            .ensure_seed_user(RegisterRequest::new(seed.username, seed.email, seed.password))
            .await
            .context("failed to create the seed user")?;
    }

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(address = %config.bind, "listening");
    axum::serve(listener, build_router(state.shared()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
