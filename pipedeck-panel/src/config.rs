//! Panel configuration.

use std::env;
use std::time::Duration;

/// Default backend URL (the dashboard server's default bind).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Default status poll period.
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_millis(2000);
/// Default log fetch period.
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_millis(2000);
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings for a [`ControlPanel`](crate::ControlPanel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Backend base URL.
    base_url: String,
    /// Period of the status poller.
    status_interval: Duration,
    /// Period of the log tailer.
    log_interval: Duration,
    /// Timeout for each HTTP request.
    request_timeout: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            status_interval: DEFAULT_STATUS_INTERVAL,
            log_interval: DEFAULT_LOG_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl PanelConfig {
    /// Create a new builder.
    pub fn builder() -> PanelConfigBuilder {
        PanelConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PIPEDECK_URL`: backend base URL
    /// - `PIPEDECK_STATUS_INTERVAL_MS`: status poll period in milliseconds
    /// - `PIPEDECK_LOG_INTERVAL_MS`: log fetch period in milliseconds
    /// - `PIPEDECK_REQUEST_TIMEOUT_SECS`: per-request timeout in seconds
    ///
    /// Unset, unparsable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`PanelConfig::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("PIPEDECK_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        Self {
            base_url,
            status_interval: positive(lookup("PIPEDECK_STATUS_INTERVAL_MS"))
                .map(Duration::from_millis)
                .unwrap_or(defaults.status_interval),
            log_interval: positive(lookup("PIPEDECK_LOG_INTERVAL_MS"))
                .map(Duration::from_millis)
                .unwrap_or(defaults.log_interval),
            request_timeout: positive(lookup("PIPEDECK_REQUEST_TIMEOUT_SECS"))
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Get the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the status poll period.
    pub fn status_interval(&self) -> Duration {
        self.status_interval
    }

    /// Get the log fetch period.
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    /// Get the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Return a builder seeded with this configuration.
    pub fn to_builder(&self) -> PanelConfigBuilder {
        PanelConfigBuilder {
            base_url: Some(self.base_url.clone()),
            status_interval: Some(self.status_interval),
            log_interval: Some(self.log_interval),
            request_timeout: Some(self.request_timeout),
        }
    }
}

fn positive(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

/// `period`, or `fallback` if `period` is zero. A zero period would panic
/// the interval inside the spawned task.
pub(crate) fn nonzero_period(period: Duration, fallback: Duration, what: &str) -> Duration {
    if period.is_zero() {
        tracing::warn!(
            what,
            fallback_ms = fallback.as_millis() as u64,
            "Zero period ignored"
        );
        fallback
    } else {
        period
    }
}

/// Builder for PanelConfig.
#[derive(Debug, Clone, Default)]
pub struct PanelConfigBuilder {
    base_url: Option<String>,
    status_interval: Option<Duration>,
    log_interval: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl PanelConfigBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the status poll period. Zero is ignored.
    pub fn status_interval(mut self, period: Duration) -> Self {
        if !period.is_zero() {
            self.status_interval = Some(period);
        }
        self
    }

    /// Set the log fetch period. Zero is ignored.
    pub fn log_interval(mut self, period: Duration) -> Self {
        if !period.is_zero() {
            self.log_interval = Some(period);
        }
        self
    }

    /// Set the per-request timeout. Zero is ignored.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.request_timeout = Some(timeout);
        }
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PanelConfig {
        let defaults = PanelConfig::default();
        PanelConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            status_interval: self.status_interval.unwrap_or(defaults.status_interval),
            log_interval: self.log_interval.unwrap_or(defaults.log_interval),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        }
    }
}
