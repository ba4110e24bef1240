//! Structured logging for pipedeck.
//!
//! Library code only emits `tracing` events; binaries call [`init_tracing`]
//! once at startup.
//!
//! # Configuration
//!
//! Format is controlled via `PIPEDECK_LOG_FORMAT`:
//! - `json` - one JSON object per event
//! - `pretty` - human-readable multi-line output (default on a terminal)
//! - `compact` - single-line output
//!
//! The filter comes from `PIPEDECK_LOG_LEVEL`, then `RUST_LOG`, then `info`
//! (or the default passed to [`TracingConfig::from_env_or`]).
//! `PIPEDECK_LOG_LOCATION=1` adds file and line to each event.
//!
//! # Example
//!
//! ```ignore
//! use pipedeck_panel::observability::{LogFormat, TracingConfig, init_tracing};
//!
//! let config = TracingConfig::builder()
//!     .log_format(LogFormat::Compact)
//!     .log_filter("warn,pipedeck_panel=debug")
//!     .build();
//! let _guard = init_tracing(config)?;
//! ```

mod config;
mod tracing_setup;

pub use config::{LogFormat, TracingConfig, TracingConfigBuilder};
pub use tracing_setup::{TracingGuard, init_tracing};
