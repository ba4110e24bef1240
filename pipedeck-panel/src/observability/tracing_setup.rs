//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::{LogFormat, TracingConfig};

/// Keeps logging alive for the lifetime of the program.
///
/// Hold it in `main`; nothing needs flushing today, but callers keep the same
/// shape if a buffered writer is added.
#[must_use = "dropping the guard immediately is almost always a mistake"]
pub struct TracingGuard {
    _private: (),
}

/// Install the global tracing subscriber.
///
/// An invalid filter string falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
///
/// # Example
///
/// ```ignore
/// let _guard = init_tracing(TracingConfig::from_env())?;
/// ```
pub fn init_tracing(config: TracingConfig) -> Result<TracingGuard> {
    let filter = EnvFilter::try_new(config.log_filter()).unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = if config.to_stderr() {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_file(config.include_location())
        .with_line_number(config.include_location())
        .with_target(config.include_target());

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format() {
        LogFormat::Json => registry.with(layer.json().flatten_event(true)).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    }
    .context("Failed to initialize tracing subscriber")?;

    Ok(TracingGuard { _private: () })
}
