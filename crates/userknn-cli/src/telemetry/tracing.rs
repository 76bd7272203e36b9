//! Tracing initialization and configuration.

use std::io;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Default filter when `RUST_LOG` is unset: configuration notices only.
const DEFAULT_FILTER: &str = "warn";

/// Initializes the tracing subscriber for structured logging on stderr.
///
/// Stdout is reserved for recommendations, so all events go to stderr.
///
/// # Configuration
///
/// The log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `warn` level.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug userknn --demo --user Hailey
/// RUST_LOG=userknn_core::neighborhood=trace userknn --demo --user Hailey
/// ```
///
/// # Errors
///
/// Returns an error if the tracing subscriber fails to initialize.
pub(super) fn init_tracing() -> anyhow::Result<()> {
    let env_filter = create_env_filter()?;
    let fmt_layer = create_fmt_layer();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}

/// Creates an environment filter for tracing.
fn create_env_filter() -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))
}

/// Creates a formatted tracing layer writing to stderr.
fn create_fmt_layer() -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_ansi(true)
}
