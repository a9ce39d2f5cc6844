//! Tracing subscriber setup for the server binary.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "sprintboard=info,tower_http=info";

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. With `json` set, events are
/// emitted as one JSON object per line.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init(json: bool) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        return registry
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init();
    }
    registry
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
}
