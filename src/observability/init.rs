//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber with a non-blocking file
//! appender. Logs go to a file rather than stdout because the terminal is
//! owned by the renderer; anything printed to stdout would corrupt the UI.

use crate::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based log output.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters events based on the configured log level
/// 2. Formats them with the standard fmt layer (no ANSI, file target)
/// 3. Writes through a non-blocking appender to the platform data directory
///
/// # Log Level Resolution
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable if set
/// 2. `config.log_level` otherwise
/// 3. Default: `"info"`
///
/// # File Location
///
/// Logs are written to `postdeck.log` inside the platform data directory
/// (`~/.local/share/postdeck` on Linux).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently disables logging if the directory cannot be created
///   (observability is optional)
/// - Idempotent: safe to call multiple times (only the first call takes effect)
///
/// # Returns
///
/// The appender's worker guard; dropping it flushes and stops the background
/// writer, so the caller must keep it alive for the program's lifetime.
/// Returns `None` when logging could not be set up.
pub fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_level.clone().unwrap_or_else(|| "info".to_string()))
    });

    let file_appender = tracing_appender::rolling::never(
        &data_dir,
        crate::infrastructure::paths::log_file_name(),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();

    Some(guard)
}
