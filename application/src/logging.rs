//! Logging initialization.

use std::{io, sync::OnceLock};

use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

/// [`log::Level`]s written to [`io::stderr`] rather than [`io::stdout`].
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum [`log::Level`] being written.
///
/// Defaults to [`log::Level::INFO`] until [`set_level()`] is called.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

/// Checks whether an event of the provided [`log::Level`] is enabled.
fn is_enabled(level: log::Level) -> bool {
    LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO) >= level
}

/// Installs the global [`tracing`] subscriber, writing warnings and errors to
/// [`io::stderr`], and everything else to [`io::stdout`].
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || !STDERR_LEVELS.contains(meta.level())
                            && is_enabled(*meta.level())
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || STDERR_LEVELS.contains(meta.level())
                            && is_enabled(*meta.level())
                })),
        )
        .init();
}

/// Sets the maximum [`log::Level`] being written.
///
/// Only the first call has any effect.
pub fn set_level(level: log::Level) {
    if LOG_LEVEL.set(level).is_err() {
        log::warn!("log level is already set, ignoring `{level}`");
    }
}
