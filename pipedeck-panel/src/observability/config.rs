//! Logging configuration.

use std::env;
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    Json,
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line output.
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        })
    }
}

/// Configuration for the tracing subscriber.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Output format.
    log_format: LogFormat,
    /// `EnvFilter` directive string (e.g. "info", "warn,pipedeck_panel=debug").
    log_filter: String,
    /// Include file and line of each event.
    include_location: bool,
    /// Include the event target (module path).
    include_target: bool,
    /// Write to stderr instead of stdout.
    to_stderr: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_filter: "info".to_string(),
            include_location: false,
            include_target: true,
            to_stderr: true,
        }
    }
}

impl TracingConfig {
    /// Create a new builder.
    pub fn builder() -> TracingConfigBuilder {
        TracingConfigBuilder::default()
    }

    /// Create configuration from environment variables, with `info` as the
    /// filter when none is set.
    ///
    /// Environment variables:
    /// - `PIPEDECK_LOG_FORMAT`: "json", "pretty", or "compact"
    /// - `PIPEDECK_LOG_LEVEL` or `RUST_LOG`: filter string
    /// - `PIPEDECK_LOG_LOCATION`: "true" or "1" to include file and line
    pub fn from_env() -> Self {
        Self::from_env_or("info")
    }

    /// Like [`TracingConfig::from_env`], falling back to `default_filter`
    /// when neither `PIPEDECK_LOG_LEVEL` nor `RUST_LOG` is set.
    pub fn from_env_or(default_filter: &str) -> Self {
        Self::from_lookup(|key| env::var(key).ok(), default_filter)
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, default_filter: &str) -> Self {
        let log_format = lookup("PIPEDECK_LOG_FORMAT")
            .and_then(|s| s.parse::<LogFormat>().ok())
            .unwrap_or_else(|| {
                if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
                    LogFormat::Pretty
                } else {
                    LogFormat::Json
                }
            });

        let log_filter = lookup("PIPEDECK_LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| default_filter.to_string());

        Self {
            log_format,
            log_filter,
            include_location: lookup("PIPEDECK_LOG_LOCATION")
                .is_some_and(|s| s == "true" || s == "1"),
            ..Self::default()
        }
    }

    /// Return a builder seeded with this configuration.
    pub fn to_builder(&self) -> TracingConfigBuilder {
        TracingConfigBuilder {
            log_format: Some(self.log_format),
            log_filter: Some(self.log_filter.clone()),
            include_location: Some(self.include_location),
            include_target: Some(self.include_target),
            to_stderr: Some(self.to_stderr),
        }
    }

    /// Get the log format.
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Get the log filter.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Check if source location should be included.
    pub fn include_location(&self) -> bool {
        self.include_location
    }

    /// Check if target should be included.
    pub fn include_target(&self) -> bool {
        self.include_target
    }

    /// Check if output goes to stderr.
    pub fn to_stderr(&self) -> bool {
        self.to_stderr
    }
}

/// Builder for TracingConfig.
#[derive(Debug, Clone, Default)]
pub struct TracingConfigBuilder {
    log_format: Option<LogFormat>,
    log_filter: Option<String>,
    include_location: Option<bool>,
    include_target: Option<bool>,
    to_stderr: Option<bool>,
}

impl TracingConfigBuilder {
    /// Set the log format.
    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    /// Set the log filter.
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Include source location in logs.
    pub fn include_location(mut self, include: bool) -> Self {
        self.include_location = Some(include);
        self
    }

    /// Include target in logs.
    pub fn include_target(mut self, include: bool) -> Self {
        self.include_target = Some(include);
        self
    }

    /// Write to stderr (default) or stdout.
    pub fn to_stderr(mut self, stderr: bool) -> Self {
        self.to_stderr = Some(stderr);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> TracingConfig {
        let defaults = TracingConfig::default();
        TracingConfig {
            log_format: self.log_format.unwrap_or(defaults.log_format),
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
            include_location: self.include_location.unwrap_or(defaults.include_location),
            include_target: self.include_target.unwrap_or(defaults.include_target),
            to_stderr: self.to_stderr.unwrap_or(defaults.to_stderr),
        }
    }
}
