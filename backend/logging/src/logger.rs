//! Structured Logger
//!
//! Console output for humans, daily-rotated NDJSON for machines, and
//! `RUST_LOG` taking precedence over the configured level.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rolling log, e.g. `pacer.log.2026-10-19`.
pub const LOG_FILE_PREFIX: &str = "pacer.log";

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (tests, embedding
/// hosts); the existing one is left in place.
pub fn init_logger<P: AsRef<Path>>(log_dir: Option<P>, level: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir.as_ref(), LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
}
